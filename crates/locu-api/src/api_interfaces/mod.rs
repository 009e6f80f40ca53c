pub mod envelope;
pub mod venue;
