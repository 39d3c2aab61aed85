//! A small rule-based segmenter for whitespace-separated languages.

use crate::model::{Sentence, Token};
use crate::segment::pattern::RootPattern;
use crate::segment::{SentSplitting, SentenceSegmenter};

/// Characters ending a sentence under [SentSplitting::Punctuation].
const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', '…'];

/// Closing characters that stay attached to the sentence they end.
const CLOSERS: [char; 6] = ['"', '\'', ')', ']', '’', '”'];

/// Rule-based tokenizer and sentence splitter.
///
/// Tokens are runs of alphanumeric characters (with inner apostrophes and
/// hyphens, as in "don't" or "well-known") or runs of one repeated
/// punctuation character (as in "..." or "!!"). Each token records whether
/// whitespace follows it.
///
/// # Example
/// ```
/// use text_tree::segment::{RootPattern, SentSplitting, SentenceSegmenter, SimpleSegmenter};
///
/// let sentences = SimpleSegmenter.segment(
///     "I think so. I think, therefore I am! You think?",
///     &RootPattern::word("i"),
///     false,
///     SentSplitting::Punctuation,
/// );
/// assert_eq!(sentences.len(), 2);
/// assert_eq!(sentences[1].text(), "I think, therefore I am!");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSegmenter;

/// A token with the position of the whitespace following it.
#[derive(Debug)]
struct Lexeme {
    token: Token,
    newline_after: bool,
}

impl SimpleSegmenter {
    /// Splits `text` into tokens.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        lex(text).into_iter().map(|lexeme| lexeme.token).collect()
    }

    /// Splits `text` into sentences in reading order.
    pub fn split_sentences(&self, text: &str, splitting: SentSplitting) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let mut current: Vec<Token> = Vec::new();
        let lexemes = lex(text);

        for (i, lexeme) in lexemes.iter().enumerate() {
            current.push(lexeme.token.clone());

            let ends_on_punct = splitting.on_punctuation()
                && is_terminal(&lexeme.token)
                && !lexemes.get(i + 1).is_some_and(|next| is_closer(&next.token) && !lexeme.token.whitespace());
            let ends_on_newline = splitting.on_newline() && lexeme.newline_after;
            let ends_on_closer = splitting.on_punctuation()
                && is_closer(&lexeme.token)
                && i > 0
                && is_terminal(&lexemes[i - 1].token)
                && !lexemes[i - 1].token.whitespace();

            if ends_on_punct || ends_on_newline || ends_on_closer {
                sentences.push(finish(std::mem::take(&mut current)));
            }
        }
        if !current.is_empty() {
            sentences.push(finish(current));
        }

        sentences
    }
}

impl SentenceSegmenter for SimpleSegmenter {
    fn segment(
        &self,
        text: &str,
        pattern: &RootPattern,
        reverse: bool,
        splitting: SentSplitting,
    ) -> Vec<Sentence> {
        self.split_sentences(text, splitting)
            .into_iter()
            .filter_map(|sentence| match_sentence(sentence, pattern, reverse))
            .collect()
    }
}

/// Returns the sentence in root-first order if `pattern` matches at its start
/// (forward) or end (reverse, ignoring trailing punctuation).
fn match_sentence(sentence: Sentence, pattern: &RootPattern, reverse: bool) -> Option<Sentence> {
    let tokens = sentence.tokens();
    if pattern.is_empty() || tokens.len() < pattern.len() {
        return None;
    }

    if !reverse {
        return pattern.matches_at(tokens, 0).then_some(sentence);
    }

    let end = tokens.len() - tokens.iter().rev().take_while(|t| t.is_punct()).count();
    if end < pattern.len() || !pattern.matches_at(tokens, end - pattern.len()) {
        return None;
    }

    let mut reversed: Vec<Token> = tokens[..end].iter().rev().cloned().collect();
    // The last word read before the excluded punctuation ends the sentence
    if let Some(first) = reversed.first_mut() {
        *first = Token::new(first.text(), false, first.is_punct());
    }
    Some(Sentence::new(reversed))
}

/// Clears the whitespace flag of the final token of a sentence.
fn finish(mut tokens: Vec<Token>) -> Sentence {
    if let Some(last) = tokens.last_mut() {
        *last = Token::new(last.text(), false, last.is_punct());
    }
    Sentence::new(tokens)
}

fn is_terminal(token: &Token) -> bool {
    token.is_punct() && token.text().chars().all(|c| SENTENCE_TERMINATORS.contains(&c))
}

fn is_closer(token: &Token) -> bool {
    token.is_punct() && token.text().chars().all(|c| CLOSERS.contains(&c))
}

fn lex(text: &str) -> Vec<Lexeme> {
    let chars: Vec<char> = text.chars().collect();
    let mut lexemes: Vec<Lexeme> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if let Some(last) = lexemes.last_mut() {
                last.token = Token::new(last.token.text(), true, last.token.is_punct());
                last.newline_after |= chars[start..i].contains(&'\n');
            }
            continue;
        }

        let start = i;
        if c.is_alphanumeric() {
            i += 1;
            while i < chars.len() {
                if chars[i].is_alphanumeric() {
                    i += 1;
                } else if is_joiner(chars[i]) && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric()) {
                    i += 2;
                } else {
                    break;
                }
            }
        } else {
            while i < chars.len() && chars[i] == c {
                i += 1;
            }
        }

        let word: String = chars[start..i].iter().collect();
        lexemes.push(Lexeme {
            token: Token::word(word, false),
            newline_after: false,
        });
    }

    lexemes
}

fn is_joiner(c: char) -> bool {
    matches!(c, '\'' | '’' | '-')
}
