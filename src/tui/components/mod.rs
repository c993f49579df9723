pub mod amount_input;
pub mod currency_select;
pub mod result_panel;

pub use amount_input::{AmountEvent, AmountInput};
pub use currency_select::{CurrencySelect, cycle_selection};
pub use result_panel::ResultPanel;
