use time::OffsetDateTime;

fn main() {
    let today = OffsetDateTime::now_utc().date();
    println!("cargo:rustc-env=SPRIG_BUILD_DATE={today}");
    println!("cargo:rerun-if-changed=build.rs");
}
