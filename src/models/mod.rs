pub mod acknowledgements;
pub mod audit;
pub mod departments;
pub mod documents;
pub mod pagination;
pub mod search;
pub mod users;
