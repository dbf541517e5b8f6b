pub mod inquiries;
pub mod pix;
pub mod products;
pub mod sales;
pub mod users;
