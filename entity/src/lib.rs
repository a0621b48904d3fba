pub mod customer;
pub mod document;
pub mod invoice;
pub mod line_item;
pub mod vendor;
