//! Mapping between residue letters and the small integer codes the kernel reads.

use crate::error::AlignError;

const NO_CODE: u8 = u8::MAX;

static DNA_SYMBOLS: &[u8] = b"ACGTN";
// A <-> T, C <-> G, N stays N
static DNA_COMPLEMENT: &[u8] = &[3, 2, 1, 0, 4];

static PROTEIN_SYMBOLS: &[u8] = b"ARNDCQEGHILKMFPSTWYVX";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: &'static [u8],
    codes: [u8; 256],
    wildcard: u8,
    complement: Option<&'static [u8]>,
}

impl Alphabet {
    /// `ACGTN`. `U` reads as `T`, IUPAC ambiguity letters read as `N`.
    pub fn dna() -> Self {
        let mut codes = [NO_CODE; 256];
        for (code, &c) in DNA_SYMBOLS.iter().enumerate() {
            codes[c as usize] = code as u8;
            codes[c.to_ascii_lowercase() as usize] = code as u8;
        }
        for &c in b"UuRrYySsWwKkMmBbDdHhVv" {
            codes[c as usize] = if c.eq_ignore_ascii_case(&b'U') { 3 } else { 4 };
        }
        Self { symbols: DNA_SYMBOLS, codes, wildcard: 4, complement: Some(DNA_COMPLEMENT) }
    }

    /// The 20 standard amino acids plus `X`. `B`, `Z`, `J`, `U`, `O` and `*`
    /// read as `X`.
    pub fn protein() -> Self {
        let mut codes = [NO_CODE; 256];
        for (code, &c) in PROTEIN_SYMBOLS.iter().enumerate() {
            codes[c as usize] = code as u8;
            codes[c.to_ascii_lowercase() as usize] = code as u8;
        }
        let x = (PROTEIN_SYMBOLS.len() - 1) as u8;
        for &c in b"BbZzJjUuOo*" {
            codes[c as usize] = x;
        }
        Self { symbols: PROTEIN_SYMBOLS, codes, wildcard: x, complement: None }
    }

    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[u8] {
        self.symbols
    }

    pub fn wildcard(&self) -> u8 {
        self.wildcard
    }

    pub fn code(&self, letter: u8) -> Option<u8> {
        match self.codes[letter as usize] {
            NO_CODE => None,
            code => Some(code),
        }
    }

    pub fn encode(&self, text: &[u8]) -> Result<Vec<u8>, AlignError> {
        text.iter()
            .enumerate()
            .map(|(position, &symbol)| {
                self.code(symbol).ok_or(AlignError::InvalidSymbol { symbol, position, alphabet_size: self.size() })
            })
            .collect()
    }

    /// Codes outside the alphabet decode to `?`.
    pub fn decode(&self, codes: &[u8]) -> Vec<u8> {
        codes.iter().map(|&c| self.symbols.get(c as usize).copied().unwrap_or(b'?')).collect()
    }

    /// Rejects any code that is not below [`Alphabet::size`].
    pub fn check(&self, codes: &[u8]) -> Result<(), AlignError> {
        match codes.iter().position(|&c| c as usize >= self.size()) {
            Some(position) => Err(AlignError::InvalidSymbol {
                symbol: codes[position],
                position,
                alphabet_size: self.size(),
            }),
            None => Ok(()),
        }
    }

    pub fn has_complement(&self) -> bool {
        self.complement.is_some()
    }

    /// Code to code, indexed by code.
    pub fn complement_table(&self) -> Option<&'static [u8]> {
        self.complement
    }

    pub fn reverse_complement(&self, codes: &[u8]) -> Result<Vec<u8>, AlignError> {
        let table = self.complement.ok_or(AlignError::MissingComplement)?;
        self.check(codes)?;
        Ok(codes.iter().rev().map(|&c| table[c as usize]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dna_codes() {
        let dna = Alphabet::dna();
        assert_eq!(dna.encode(b"ACGTNacgtn").unwrap(), vec![0, 1, 2, 3, 4, 0, 1, 2, 3, 4]);
        assert_eq!(dna.encode(b"URy").unwrap(), vec![3, 4, 4]);
        assert_eq!(dna.decode(&[2, 0, 4, 9]), b"GAN?".to_vec());
        assert_eq!(
            dna.encode(b"AC-G"),
            Err(AlignError::InvalidSymbol { symbol: b'-', position: 2, alphabet_size: 5 })
        );
    }

    #[test]
    fn test_dna_complement() {
        let dna = Alphabet::dna();
        let codes = dna.encode(b"AACGTN").unwrap();
        let rc = dna.reverse_complement(&codes).unwrap();
        assert_eq!(dna.decode(&rc), b"NACGTT".to_vec());
    }

    #[test]
    fn test_protein() {
        let protein = Alphabet::protein();
        assert_eq!(protein.size(), 21);
        assert_eq!(protein.encode(b"ARV*b").unwrap(), vec![0, 1, 19, 20, 20]);
        assert!(!protein.has_complement());
        assert_eq!(protein.reverse_complement(&[0, 1]), Err(AlignError::MissingComplement));
        assert_eq!(
            protein.check(&[0, 3, 21]),
            Err(AlignError::InvalidSymbol { symbol: 21, position: 2, alphabet_size: 21 })
        );
    }
}
