mod ops;
mod roller;
