fn main() {
    let args: Vec<String> = std::env::args().collect();
    if let Err(err) = item_unify::run(&args) {
        eprintln!("item-unify: {}", err);
        std::process::exit(1);
    }
}
