pub mod roster;

#[cfg(test)]
mod tests;
