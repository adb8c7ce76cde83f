fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the banking service protos (single `pb` package)
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/user.proto", "proto/service_basic_bank.proto"], &["proto/"])?;

    println!("cargo:rerun-if-changed=proto/");

    Ok(())
}
