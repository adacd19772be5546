use std::collections::HashMap;

/// The name an empty cell is written as. A blank cell in a grid file reads the
/// same.
pub const EMPTY_TOKEN_NAME: &str = "z";

/// An interned occupancy token. Grids store these instead of names so that the
/// hot path compares and indexes with integers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u32);

impl Token {
    /// Nothing occupies the cell
    pub const EMPTY: Token = Token(0);

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == Self::EMPTY.0
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Two way name <-> `Token` mapping. Index 0 is always the empty token.
#[derive(Debug, Clone)]
pub struct TokenTable {
    names: Vec<String>,
    ids: HashMap<String, Token>,
}

impl TokenTable {
    pub fn new() -> Self {
        let mut ids = HashMap::new();
        ids.insert(EMPTY_TOKEN_NAME.to_owned(), Token::EMPTY);
        Self {
            names: vec![EMPTY_TOKEN_NAME.to_owned()],
            ids,
        }
    }

    /// Get the token for `name`, allocating a new one if it hasn't been seen.
    /// Leading/trailing whitespace is ignored and a blank name is empty.
    pub fn intern(&mut self, name: &str) -> Token {
        let name = name.trim();
        if name.is_empty() {
            return Token::EMPTY;
        }
        if let Some(token) = self.ids.get(name) {
            return *token;
        }
        let token = Token(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), token);
        token
    }

    /// Look up without interning
    pub fn get(&self, name: &str) -> Option<Token> {
        let name = name.trim();
        if name.is_empty() {
            return Some(Token::EMPTY);
        }
        self.ids.get(name).copied()
    }

    pub fn name(&self, token: Token) -> Option<&str> {
        self.names.get(token.index()).map(|s| s.as_str())
    }

    /// Count including the empty token
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        // The empty token is always present
        false
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::new()
    }
}
