// Cases for NO_PRINTLN

fn print_denied_token(token: &str) {
    println!("access denied for {token}");
}

fn print_store_failure() {
    eprintln!("store unavailable");
}

fn dump_company_id() {
    let company_id = "C1";
    dbg!(company_id);
}

// Allowed
fn log_denial() {
    tracing::warn!(request_id = "req-1", kind = "Forbidden", "access denied");
}

fn main() {
    print_denied_token("tok-C");
    print_store_failure();
    dump_company_id();
    log_denial();
}
