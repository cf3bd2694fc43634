// Core modules implementing decoding, rendering, and error modeling.
pub mod document;
pub mod error;
pub mod pretty;
pub mod report;
