//! Amino acid codes

/// Single-letter code of a three-letter amino acid code as written in HGVS
/// (case-sensitive). `Ter` maps to `*`.
pub fn one_letter_code(three_letter: &str) -> Option<char> {
    let code = match three_letter {
        "Ala" => 'A',
        "Arg" => 'R',
        "Asn" => 'N',
        "Asp" => 'D',
        "Cys" => 'C',
        "Gln" => 'Q',
        "Glu" => 'E',
        "Gly" => 'G',
        "His" => 'H',
        "Ile" => 'I',
        "Leu" => 'L',
        "Lys" => 'K',
        "Met" => 'M',
        "Phe" => 'F',
        "Pro" => 'P',
        "Pyl" => 'O',
        "Sec" => 'U',
        "Ser" => 'S',
        "Thr" => 'T',
        "Trp" => 'W',
        "Tyr" => 'Y',
        "Val" => 'V',
        "Ter" => '*',
        "Xaa" => 'X',
        _ => return None,
    };
    Some(code)
}
