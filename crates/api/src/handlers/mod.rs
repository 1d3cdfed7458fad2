//! Request handlers.
//!
//! Public handlers read through the response cache and never require
//! identity. Admin handlers take an identity extractor, delegate to the
//! repositories or the FAQ workflow in `faircms_db`, and run side effects
//! only after the database work has committed.

pub mod audit;
pub mod category;
pub mod faq;
pub mod glossary;
pub mod import;
pub mod notification;
pub mod public_faq;
pub mod public_glossary;
pub mod read_through;
pub mod tag;
