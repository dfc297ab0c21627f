use crate::domain::WishlistItem;

#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    /// Saves a product; saving one that is already there changes nothing.
    Add(WishlistItem),
    Remove(String),
    Clear,
    /// Replaces the whole list with what a client has been holding locally.
    Replace(Vec<WishlistItem>),
}
