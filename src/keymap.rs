/// Candidate table for the classic 12-key multi-tap pad. Sequence order is
/// the cycle order; the last entry of every key is the key's own digit.
const PAD: &[(char, &[char])] = &[
    ('1', &['.', ',', '\'', '?', '!', '1']),
    ('2', &['A', 'B', 'C', '2']),
    ('3', &['D', 'E', 'F', '3']),
    ('4', &['G', 'H', 'I', '4']),
    ('5', &['J', 'K', 'L', '5']),
    ('6', &['M', 'N', 'O', '6']),
    ('7', &['P', 'Q', 'R', 'S', '7']),
    ('8', &['T', 'U', 'V', '8']),
    ('9', &['W', 'X', 'Y', 'Z', '9']),
    ('0', &[' ', '0']),
];

/// Static mapping from a pad key to its ordered candidate characters.
/// The table never changes during a session.
#[derive(Clone, Copy, Debug)]
pub struct Keymap {
    table: &'static [(char, &'static [char])],
}

impl Default for Keymap {
    fn default() -> Self {
        Self { table: PAD }
    }
}

impl Keymap {
    pub fn candidates(&self, key: char) -> Option<&'static [char]> {
        self.table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, chars)| *chars)
    }

    pub fn contains(&self, key: char) -> bool {
        self.candidates(key).is_some()
    }

    /// Pad keys in layout order, for rendering the on-screen keypad.
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.table.iter().map(|(k, _)| *k)
    }
}
