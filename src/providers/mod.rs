pub mod smart_quote;

pub use smart_quote::SmartQuoteProvider;
