pub mod benchmarking;
