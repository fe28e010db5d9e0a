fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").expect("target_os not specified");
    let target_env = std::env::var("CARGO_CFG_TARGET_ENV").expect("target_env not specified");

    if target_os != "linux" || target_env != "gnu" {
        return;
    }

    pthread_compat::link::emit_cargo_link_args();
}
