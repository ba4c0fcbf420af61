//! The Grammar Engine: a small set of combinator primitives (`Terminal`,
//! `Choice`-via-backtracking, `Optional`, `ZeroOrMore`/`OneOrMore`,
//! `DelimitedList`, `Not`, `NoMatch`) that the Grammar Rules in
//! [`super::grammar`] are written against. Mutual recursion between
//! productions (mutual recursion, conceptually "Forward") falls out of ordinary Rust
//! function calls, so there is no separate thunk type to construct — the
//! call graph of `grammar::*` functions *is* the forward-declared grammar.
//!
//! Backtracking is expressed as `Engine::attempt`: snapshot the cursor,
//! run a closure, and rewind on failure. Ordered choice is just sequential
//! `attempt` calls in the grammar rule's source order; the first branch
//! that returns `Ok` wins, exactly the "commits to the first that consumes
//! at least one token successfully" contract (branches that fail are fully
//! rewound, so a branch that technically advanced past a valid prefix before
//! dead-ending does not leak its partial consumption to a later branch).
//!
//! The engine tracks `max_reached`/`expected_at_max` across every attempt,
//! including rewound ones, so the final diagnostic can point at the
//! farthest position any alternative got to, with the full "expected" set
//! collected there — not just whatever the last-tried, necessarily-failing
//! alternative wanted.

use crate::limit::LimitTracker;
use crate::token::{Token, TokenKind};

/// Failure is a unit type: the engine already recorded everything a
/// diagnostic needs (`max_reached`/`expected_at_max`) as a side effect of
/// the failing call, so there is nothing more for the `Err` payload to
/// carry. Failure carries the farthest
/// token index reached" — carried on the engine, not threaded through
/// every `Result`.
pub(crate) type PResult<T> = Result<T, ()>;

pub(crate) struct Engine<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    depth: usize,
    recursion: LimitTracker,
    max_reached: usize,
    expected_at_max: Vec<&'static str>,
    limit_hit: bool,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(tokens: &'a [Token<'a>], recursion_limit: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            recursion: LimitTracker::new(recursion_limit),
            max_reached: 0,
            expected_at_max: Vec::new(),
            limit_hit: false,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token<'a> {
        &self.tokens[self.pos]
    }

    pub(crate) fn peek_n(&self, n: usize) -> &Token<'a> {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// True when the current token is a `TypeReference`/`Identifier` whose
    /// literal text matches `kw` exactly. ASN.1 keywords are not their own
    /// lexical class (see `crate::token`); this is the "reserved-word
    /// guard" this grammar treats as load-bearing, applied positively here
    /// (checking *for* a keyword) and negatively in
    /// [`super::grammar::keyword::is_reserved`] (checking a reference is
    /// *not* one).
    pub(crate) fn at_keyword(&self, kw: &str) -> bool {
        let t = self.peek();
        matches!(t.kind, TokenKind::TypeReference | TokenKind::Identifier) && t.text == kw
    }

    /// Records the farthest position reached and what was expected there,
    /// for the final "expected one of ..." diagnostic.
    fn note_progress(&mut self, expected: &'static str) {
        if self.pos > self.max_reached {
            self.max_reached = self.pos;
            self.expected_at_max.clear();
            self.expected_at_max.push(expected);
        } else if self.pos == self.max_reached && !self.expected_at_max.contains(&expected) {
            self.expected_at_max.push(expected);
        }
    }

    pub(crate) fn bump(&mut self) -> Token<'a> {
        let t = *self.peek();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    /// *Terminal(kind)* — consumes one token of the given kind.
    pub(crate) fn terminal(&mut self, kind: TokenKind) -> PResult<Token<'a>> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            self.note_progress(kind.describe());
            Err(())
        }
    }

    /// *Terminal(literal)* for reserved words.
    pub(crate) fn keyword(&mut self, kw: &'static str) -> PResult<Token<'a>> {
        if self.at_keyword(kw) {
            Ok(self.bump())
        } else {
            self.note_progress(kw);
            Err(())
        }
    }

    /// The backtracking primitive every *Choice* alternative is built from:
    /// run `f`, rewinding the cursor if it fails.
    pub(crate) fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let start = self.pos;
        match f(self) {
            Ok(v) => Ok(v),
            Err(()) => {
                self.pos = start;
                Err(())
            }
        }
    }

    /// *Optional(p)*.
    pub(crate) fn optional<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        self.attempt(f).ok()
    }

    /// *ZeroOrMore(p)* — greedy, stops as soon as an attempt fails or makes
    /// no progress (guards against an inner rule that can succeed without
    /// consuming any tokens, which would otherwise loop forever).
    pub(crate) fn zero_or_more<T>(&mut self, mut f: impl FnMut(&mut Self) -> PResult<T>) -> Vec<T> {
        let mut out = Vec::new();
        loop {
            let before = self.pos;
            match self.attempt(&mut f) {
                Ok(v) => {
                    out.push(v);
                    if self.pos == before {
                        break;
                    }
                }
                Err(()) => break,
            }
        }
        out
    }

    /// *OneOrMore(p)*.
    pub(crate) fn one_or_more<T>(&mut self, mut f: impl FnMut(&mut Self) -> PResult<T>) -> PResult<Vec<T>> {
        let first = self.attempt(&mut f)?;
        let mut out = vec![first];
        out.extend(self.zero_or_more(f));
        Ok(out)
    }

    /// *DelimitedList(p, delim)*.
    pub(crate) fn delimited_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
        mut delim: impl FnMut(&mut Self) -> PResult<()>,
    ) -> PResult<Vec<T>> {
        let mut out = vec![self.attempt(&mut item)?];
        loop {
            let before = self.pos;
            let next = self.attempt(|e| {
                delim(e)?;
                item(e)
            });
            match next {
                Ok(v) => out.push(v),
                Err(()) => {
                    self.pos = before;
                    break;
                }
            }
        }
        Ok(out)
    }

    /// *Not(p)* — lookahead; succeeds without consuming iff `p` fails.
    pub(crate) fn not<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<()> {
        let before = self.pos;
        let result = f(self);
        self.pos = before;
        match result {
            Ok(_) => Err(()),
            Err(()) => Ok(()),
        }
    }

    /// *NoMatch* — for X.681 constructs this implementation does not
    /// support (object-from-object, object-set-from-objects, defined
    /// syntax beyond the fixed-field form). Always fails; callers surface
    /// this as a clear "not implemented" diagnostic rather than guessing.
    pub(crate) fn no_match<T>(&mut self, what: &'static str) -> PResult<T> {
        self.note_progress(what);
        Err(())
    }

    /// Wraps a production body with the recursion-depth guard. Exceeding
    /// the limit is recorded as `limit_hit` (distinct from
    /// an ordinary syntax failure) and still returns `Err` so the calling
    /// `Choice`/`Sequence` unwinds normally; the caller at the top level
    /// checks `limit_hit` first when deciding how to report overall
    /// failure.
    pub(crate) fn recurse<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.depth += 1;
        self.recursion.consume();
        if self.recursion.limited() {
            self.limit_hit = true;
            self.depth -= 1;
            return Err(());
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn limit_hit(&self) -> bool {
        self.limit_hit
    }

    pub(crate) fn max_reached_token(&self) -> &Token<'a> {
        &self.tokens[self.max_reached.min(self.tokens.len() - 1)]
    }

    pub(crate) fn expected_at_max(&self) -> Vec<String> {
        self.expected_at_max.iter().map(|s| s.to_string()).collect()
    }
}

/// *Choice(a, b, …)* — tries each branch in source order via [`Engine::attempt`],
/// taking the first that succeeds. Implemented as a macro rather than a
/// method over a slice of closures because each branch typically has a
/// distinct concrete closure type; the macro just unrolls into sequential
/// `attempt` calls guarded by a running `Result`.
macro_rules! choice {
    ($engine:expr, $($branch:expr),+ $(,)?) => {{
        let mut __result = Err(());
        $(
            if __result.is_err() {
                __result = $engine.attempt($branch);
            }
        )+
        __result
    }};
}
pub(crate) use choice;
