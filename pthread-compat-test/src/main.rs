//! A binary linked with `--wrap`, so that every pthread call std makes goes
//! through the shims

fn main() {
    cfg_if::cfg_if! {
        if #[cfg(all(target_os = "linux", target_env = "gnu"))] {
            pthread_compat::link::retain();
        }
    }

    let answer = std::thread::spawn(|| 42)
        .join()
        .expect("failed to join thread");

    println!("{answer}");
}
