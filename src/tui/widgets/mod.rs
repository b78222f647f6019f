pub mod portrait;
