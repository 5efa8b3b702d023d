fn main() {
  if let Err(e) = lift_log_lib::run() {
    eprintln!("lift-log: {}", e);
    std::process::exit(1);
  }
}
