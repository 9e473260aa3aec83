//! Embedded guest ELF and image ID (`EVEN_NUMBER_GUEST_ELF`, `EVEN_NUMBER_GUEST_ID`).

include!(concat!(env!("OUT_DIR"), "/methods.rs"));
