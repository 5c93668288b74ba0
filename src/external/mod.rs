pub mod alphavantage;
#[cfg(test)]
pub mod fake;
pub mod market_data;
