//! Static font-metric tables for the two PDF base fonts used by the export.
//!
//! Widths are AFM widths in em units (AFM / 1000), indexed by WinAnsiEncoding
//! byte from 0x20 through 0xFF. Text is measured through the same char → byte
//! mapping the content stream uses, so wrapping agrees with what the viewer draws.

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

/// Base-14 faces referenced by the exported document. Neither is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Body text.
    Helvetica,
    /// Headings and block labels.
    HelveticaBold,
}

impl FontFace {
    /// PostScript name written to the font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used by content-stream `Tf` operators.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsiEncoding
// ────────────────────────────────────────────────────────────────────────────

/// Lowest and highest codes covered by the width tables and the font's `Widths` array.
pub const FIRST_CHAR: u8 = 0x20;
pub const LAST_CHAR: u8 = 0xFF;

/// WinAnsi byte for `c`.
///
/// Tab becomes a space and other control characters have no byte. Characters the
/// encoding lacks are drawn as `?`.
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        '\t' => b' ',
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        c if c.is_control() => return None,
        _ => b'?',
    };
    Some(code)
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

const TABLE_LEN: usize = (LAST_CHAR - FIRST_CHAR) as usize + 1;

/// Per-face widths, slot = WinAnsi byte - 0x20.
/// Unassigned codes (0x7F, 0x81, 0x8D, 0x8F, 0x90, 0x9D) carry the bullet width,
/// which is what viewers substitute for them.
pub struct FontMetricTable {
    widths: [f32; TABLE_LEN],
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of one WinAnsi byte in em units.
    pub fn code_width(&self, code: u8) -> f32 {
        if code < FIRST_CHAR {
            return 0.0;
        }
        self.widths[(code - FIRST_CHAR) as usize]
    }

    /// Width of `c` as drawn; characters with no byte take no space.
    pub fn char_width(&self, c: char) -> f32 {
        win_ansi_code(c).map_or(0.0, |code| self.code_width(code))
    }

    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// `Widths` array for a simple font spanning `FIRST_CHAR..=LAST_CHAR`,
    /// in thousandths of an em as PDF expects.
    pub fn pdf_widths(&self) -> Vec<i64> {
        self.widths
            .iter()
            .map(|w| (w * 1000.0).round() as i64)
            .collect()
    }

    /// Greedy word-wrap at `max_width_em`.
    ///
    /// Explicit newlines start a new line; an empty input line becomes an empty
    /// output line. Runs of whitespace collapse to one space. A word wider than
    /// the line is broken between characters.
    pub fn wrap_text(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();

        for paragraph in text.lines() {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                for piece in self.split_long_word(word, max_width_em) {
                    let piece_width = self.measure_str(&piece);

                    if current.is_empty() {
                        current = piece;
                        current_width = piece_width;
                    } else if current_width + self.space_width + piece_width > max_width_em {
                        lines.push(std::mem::take(&mut current));
                        current = piece;
                        current_width = piece_width;
                    } else {
                        current.push(' ');
                        current.push_str(&piece);
                        current_width += self.space_width + piece_width;
                    }
                }
            }

            lines.push(current);
        }

        lines
    }

    fn split_long_word(&self, word: &str, max_width_em: f32) -> Vec<String> {
        if self.measure_str(word) <= max_width_em {
            return vec![word.to_string()];
        }

        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.char_width(c);
            if !current.is_empty() && width + w > max_width_em {
                pieces.push(std::mem::take(&mut current));
                width = 0.0;
            }
            current.push(c);
            width += w;
        }
        if !current.is_empty() {
            pieces.push(current);
        }
        pieces
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (Adobe core AFM, WinAnsiEncoding 0x20..=0xFF)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~     del
        0.334, 0.260, 0.334, 0.584, 0.350,
        // 0x80..=0x8F  € __ ‚ ƒ „ … † ‡ ˆ ‰ Š ‹ Œ __ Ž __
        0.556, 0.350, 0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.350, 0.611, 0.350,
        // 0x90..=0x9F  __ ‘ ’ “ ” • – — ˜ ™ š › œ __ ž Ÿ
        0.350, 0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.350, 0.500, 0.667,
        // 0xA0..=0xAF  nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0..=0xBF  ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0..=0xCF  À Á Â Ã Ä Å Æ Ç È É Ê Ë Ì Í Î Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0..=0xDF  Ð Ñ Ò Ó Ô Õ Ö × Ø Ù Ú Û Ü Ý Þ ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0..=0xEF  à á â ã ä å æ ç è é ê ë ì í î ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0..=0xFF  ð ñ ò ó ô õ ö ÷ ø ù ú û ü ý þ ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~     del
        0.389, 0.280, 0.389, 0.584, 0.350,
        // 0x80..=0x8F  € __ ‚ ƒ „ … † ‡ ˆ ‰ Š ‹ Œ __ Ž __
        0.556, 0.350, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.350, 0.611, 0.350,
        // 0x90..=0x9F  __ ‘ ’ “ ” • – — ˜ ™ š › œ __ ž Ÿ
        0.350, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.350, 0.500, 0.667,
        // 0xA0..=0xAF  nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0..=0xBF  ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0..=0xCF  À Á Â Ã Ä Å Æ Ç È É Ê Ë Ì Í Î Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0..=0xDF  Ð Ñ Ò Ó Ô Õ Ö × Ø Ù Ú Û Ü Ý Þ ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0..=0xEF  à á â ã ä å æ ç è é ê ë ì í î ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0..=0xFF  ð ñ ò ó ô õ ö ÷ ø ù ú û ü ý þ ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
    space_width: 0.278,
};

pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
