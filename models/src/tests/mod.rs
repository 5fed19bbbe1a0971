mod amount;
mod order;
mod page;
mod product;
