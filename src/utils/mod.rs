#[cfg(test)]
pub mod arbitrary;
pub mod fraction;
