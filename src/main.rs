fn main() {
    if let Err(e) = assetos::run() {
        eprintln!("assetos: {}", e);
        std::process::exit(1);
    }
}
