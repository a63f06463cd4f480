//! Built-in sample sequences, selectable by letter

/// A canned sequence offered to the user
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub letter: char,
    pub name: &'static str,
    pub values: &'static [f64],
}

pub const SAMPLES: [Sample; 4] = [
    Sample {
        letter: 'A',
        name: "Fibonacci",
        values: &[1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0, 55.0, 89.0],
    },
    Sample {
        letter: 'B',
        name: "Every other Fibonacci number",
        values: &[1.0, 2.0, 5.0, 13.0, 34.0, 89.0, 233.0],
    },
    Sample {
        letter: 'C',
        name: "Moves to solve the Tower of Hanoi",
        values: &[1.0, 3.0, 7.0, 15.0, 31.0, 63.0, 127.0, 255.0, 511.0],
    },
    Sample {
        letter: 'D',
        name: "Square triangular numbers",
        values: &[1.0, 36.0, 1225.0, 41616.0, 1413721.0, 48024900.0],
    },
];

/// Look up a sample by its letter, ignoring case
pub fn find_sample(letter: char) -> Option<&'static Sample> {
    let letter = letter.to_ascii_uppercase();
    SAMPLES.iter().find(|sample| sample.letter == letter)
}
