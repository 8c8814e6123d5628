fn main() {
    println!("cargo:rerun-if-changed=proto/compute.proto");
    tonic_prost_build::configure()
        .compile_protos(&["proto/compute.proto"], &["proto/"])
        .expect("Failed to compile proto/compute.proto");
}
