pub trait Configuration: Clone + Send + Sync + 'static {
    fn bind_address(&self) -> String;
    fn seed_example_data(&self) -> bool;
}
