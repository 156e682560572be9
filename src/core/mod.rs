pub mod bedtime;
pub mod forecast;
pub mod pass;
