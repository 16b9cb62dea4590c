pub mod controller;
pub mod google;
pub mod router;
pub mod service;
