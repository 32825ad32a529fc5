pub mod header;

pub mod assemble;

pub mod inspect;
