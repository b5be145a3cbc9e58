fn main() {
    upm::run_cli();
}
