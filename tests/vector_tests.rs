//! tests/vector_tests.rs
//! Known-answer vectors for file bodies and filenames (tests/vector/data/).

mod common;
use common::password_from;

use odrivecrypt_rs::{decrypt, decrypt_buffer, decrypt_filename, read_version};
use hex::decode;
use serde::Deserialize;
use std::io::Cursor;

// Shared JSON loader
fn load_json<T>(filename: &str) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vector")
        .join("data")
        .join(filename);

    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {filename}: {e}"));

    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {filename}: {e}"))
}

#[derive(Debug, Deserialize)]
struct FileVector {
    passphrase: String,
    plaintext_hex: String,
    ciphertext_hex: String,
}

#[derive(Debug, Deserialize)]
struct FilenameVector {
    passphrase: String,
    plaintext: String,
    ciphertext_b64: String,
}

#[test]
fn file_vectors_decrypt_buffer() {
    let vectors: Vec<FileVector> = load_json("file_vectors.json");
    assert!(!vectors.is_empty());

    for (i, v) in vectors.iter().enumerate() {
        let ciphertext = decode(&v.ciphertext_hex).unwrap();
        let expected = decode(&v.plaintext_hex).unwrap();
        let plaintext = decrypt_buffer(&ciphertext, &password_from(&v.passphrase))
            .unwrap_or_else(|e| panic!("file vector {i} failed: {e}"));
        assert_eq!(plaintext, expected, "file vector {i}");
    }
}

#[test]
fn file_vectors_stream() {
    let vectors: Vec<FileVector> = load_json("file_vectors.json");

    for (i, v) in vectors.iter().enumerate() {
        let ciphertext = decode(&v.ciphertext_hex).unwrap();
        let expected = decode(&v.plaintext_hex).unwrap();

        let mut out = Vec::new();
        let written = decrypt(
            Cursor::new(&ciphertext),
            &mut out,
            &password_from(&v.passphrase),
        )
        .unwrap_or_else(|e| panic!("file vector {i} failed: {e}"));

        assert_eq!(written, expected.len() as u64, "file vector {i}");
        assert_eq!(out, expected, "file vector {i}");
    }
}

#[test]
fn file_vectors_reject_wrong_passphrase() {
    let vectors: Vec<FileVector> = load_json("file_vectors.json");

    for (i, v) in vectors.iter().enumerate() {
        let ciphertext = decode(&v.ciphertext_hex).unwrap();
        let wrong = password_from(&format!("{}!", v.passphrase));
        let err = decrypt_buffer(&ciphertext, &wrong).unwrap_err();
        assert!(err.is_decryption_failure(), "file vector {i}: {err}");
    }
}

#[test]
fn file_vectors_all_carry_version_one() {
    let vectors: Vec<FileVector> = load_json("file_vectors.json");

    for v in &vectors {
        let ciphertext = decode(&v.ciphertext_hex).unwrap();
        assert_eq!(read_version(Cursor::new(ciphertext)).unwrap(), b'1');
    }
}

#[test]
fn filename_vectors() {
    let vectors: Vec<FilenameVector> = load_json("filename_vectors.json");
    assert!(!vectors.is_empty());

    for v in &vectors {
        let name = decrypt_filename(&v.ciphertext_b64, &password_from(&v.passphrase))
            .unwrap_or_else(|e| panic!("{} failed: {e}", v.plaintext));
        assert_eq!(name, v.plaintext);
    }
}

#[test]
fn filename_vectors_without_padding() {
    let vectors: Vec<FilenameVector> = load_json("filename_vectors.json");

    for v in &vectors {
        let unpadded = v.ciphertext_b64.trim_end_matches('=');
        let name = decrypt_filename(unpadded, &password_from(&v.passphrase)).unwrap();
        assert_eq!(name, v.plaintext);
    }
}

#[test]
fn filename_vectors_standard_alphabet() {
    let vectors: Vec<FilenameVector> = load_json("filename_vectors.json");

    for v in &vectors {
        let standard = v.ciphertext_b64.replace('-', "+").replace('_', "/");
        let name = decrypt_filename(&standard, &password_from(&v.passphrase)).unwrap();
        assert_eq!(name, v.plaintext);
    }
}
