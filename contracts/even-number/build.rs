use std::{env, fs, path::Path};

const IMAGE_ID_VAR: &str = "EVEN_NUMBER_IMAGE_ID";

fn main() {
    println!("cargo:rerun-if-env-changed={IMAGE_ID_VAR}");

    let image_id: [u8; 32] = match env::var(IMAGE_ID_VAR) {
        Ok(value) => {
            let bytes = hex::decode(value.trim().trim_start_matches("0x"))
                .unwrap_or_else(|e| panic!("{IMAGE_ID_VAR} is not valid hex: {e}"));
            bytes.try_into().unwrap_or_else(|b: Vec<u8>| {
                panic!("{IMAGE_ID_VAR} must be 32 bytes, got {}", b.len())
            })
        }
        Err(_) => {
            println!("cargo:warning={IMAGE_ID_VAR} not set; IMAGE_ID is all zeros");
            [0u8; 32]
        }
    };

    let out = Path::new(&env::var("OUT_DIR").expect("OUT_DIR is set by cargo")).join("image_id.rs");
    fs::write(
        out,
        format!(
            "/// RISC Zero image ID of the trusted `even-number-guest` program.\n\
             pub const IMAGE_ID: [u8; 32] = {image_id:?};\n"
        ),
    )
    .expect("failed to write image_id.rs");
}
