pub mod position;
pub mod swap_quote;

pub use position::Position;
pub use swap_quote::SwapQuote;
