// Integration tests follow the organization suggested by Matklad:
// https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod car_alarm;
mod fish_retailer;
mod input_order;
mod line_source;
mod test_env;
