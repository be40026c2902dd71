//! Random password suggestions used as placeholder text

use rand::seq::SliceRandom;
use rand::Rng;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!@#$%^&*()-=+[]{}|;:,.<>?";

/// Length of the suggestion shown in password fields
pub const SUGGESTED_PASSWORD_LEN: usize = 16;

/// Generate a password with at least one character from every class
pub fn generate_password(length: usize) -> String {
    generate_password_with(&mut rand::thread_rng(), length)
}

pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let classes = [UPPERCASE, LOWERCASE, DIGITS, SPECIAL];
    let all: Vec<u8> = classes.concat();

    let mut chars: Vec<u8> = classes
        .iter()
        .filter_map(|class| class.choose(&mut *rng).copied())
        .collect();
    while chars.len() < length {
        if let Some(c) = all.choose(&mut *rng) {
            chars.push(*c);
        }
    }
    chars.shuffle(rng);
    chars.into_iter().map(char::from).collect()
}
