fn main() {
    if let Err(error) = routecam_lib::run() {
        eprintln!("error: {error}");
        if let Some(suggestion) = error.suggestion {
            eprintln!("hint: {suggestion}");
        }
        std::process::exit(1);
    }
}
