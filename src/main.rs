fn main() {
    if let Err(err) = shunya_lib::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
