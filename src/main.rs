fn main() {
    morfix::cli::run();
}
