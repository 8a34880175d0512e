mod complete;
mod utils;
