use crate::options::{JsonParserOptions, ParseMode};
use crate::sink::{EventSink, SinkError};
use crate::JsonEvent;
use thiserror::Error;

const __: u8 = 0xFF; // the universal error code

// Characters are mapped into these 34 character classes. This allows for
// a significant reduction in the size of the state transition table.
const C_SPACE: u8 = 0; // space
const C_NL: u8 = 1; // newline
const C_WHITE: u8 = 2; // tab, CR
const C_LCURB: u8 = 3; // {
const C_RCURB: u8 = 4; // }
const C_LSQRB: u8 = 5; // [
const C_RSQRB: u8 = 6; // ]
const C_COLON: u8 = 7; // :
const C_COMMA: u8 = 8; // ,
const C_QUOTE: u8 = 9; // "
const C_BACKS: u8 = 10; // \
const C_SLASH: u8 = 11; // /
const C_PLUS: u8 = 12; // +
const C_MINUS: u8 = 13; // -
const C_POINT: u8 = 14; // .
const C_ZERO: u8 = 15; // 0
const C_DIGIT: u8 = 16; // 123456789
const C_LOW_A: u8 = 17; // a
const C_LOW_B: u8 = 18; // b
const C_LOW_C: u8 = 19; // c
const C_LOW_D: u8 = 20; // d
const C_LOW_E: u8 = 21; // e
const C_LOW_F: u8 = 22; // f
const C_LOW_L: u8 = 23; // l
const C_LOW_N: u8 = 24; // n
const C_LOW_R: u8 = 25; // r
const C_LOW_S: u8 = 26; // s
const C_LOW_T: u8 = 27; // t
const C_LOW_U: u8 = 28; // u
const C_ABCDF: u8 = 29; // ABCDF
const C_E: u8 = 30; // E
const C_ETC: u8 = 31; // everything else
const C_STAR: u8 = 32; // * inside a C-style comment
const C_HASH: u8 = 33; // # starting a YAML-style comment

const NR_CLASSES: usize = 34;

/// This array maps the 128 ASCII characters into character classes. The
/// remaining bytes are mapped to C_ETC. Non-whitespace control characters
/// are errors.
#[rustfmt::skip]
const ASCII_CLASS: [u8; 128] = [
    __,      __,      __,      __,      __,      __,      __,      __,
    __,      C_WHITE, C_NL,    __,      __,      C_WHITE, __,      __,
    __,      __,      __,      __,      __,      __,      __,      __,
    __,      __,      __,      __,      __,      __,      __,      __,

    C_SPACE, C_ETC,   C_QUOTE, C_HASH,  C_ETC,   C_ETC,   C_ETC,   C_ETC,
    C_ETC,   C_ETC,   C_STAR,  C_PLUS,  C_COMMA, C_MINUS, C_POINT, C_SLASH,
    C_ZERO,  C_DIGIT, C_DIGIT, C_DIGIT, C_DIGIT, C_DIGIT, C_DIGIT, C_DIGIT,
    C_DIGIT, C_DIGIT, C_COLON, C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,

    C_ETC,   C_ABCDF, C_ABCDF, C_ABCDF, C_ABCDF, C_E,     C_ABCDF, C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_LSQRB, C_BACKS, C_RSQRB, C_ETC,   C_ETC,

    C_ETC,   C_LOW_A, C_LOW_B, C_LOW_C, C_LOW_D, C_LOW_E, C_LOW_F, C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_LOW_L, C_ETC,   C_LOW_N, C_ETC,
    C_ETC,   C_ETC,   C_LOW_R, C_LOW_S, C_LOW_T, C_LOW_U, C_ETC,   C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_LCURB, C_ETC,   C_RCURB, C_ETC,   C_ETC,
];

// The parse states. The ordering matters: states up to _A are "between
// tokens", everything after it is inside a token or a comment (see the
// comment-close action).
const GO: u8 = 0; // start, before the document
const OK: u8 = 1; // after a complete value
const _O: u8 = 2; // inside an object, expect key or close
const _K: u8 = 3; // expect key after comma
const CO: u8 = 4; // expect colon
const _V: u8 = 5; // expect value
const _A: u8 = 6; // inside an array, expect value or close
const _S: u8 = 7; // inside a string
const E0: u8 = 8; // escape
const U1: u8 = 9; // unicode escape, first hex digit
const U2: u8 = 10; // unicode escape, second hex digit
const U3: u8 = 11; // unicode escape, third hex digit
const U4: u8 = 12; // unicode escape, fourth hex digit
const M0: u8 = 13; // minus
const Z0: u8 = 14; // zero
const I0: u8 = 15; // integer
const R1: u8 = 16; // after the decimal point
const R2: u8 = 17; // fractional digits
const X1: u8 = 18; // after e/E
const X2: u8 = 19; // after the exponent sign
const X3: u8 = 20; // exponent digits
const T1: u8 = 21; // tr
const T2: u8 = 22; // tru
const T3: u8 = 23; // true
const F1: u8 = 24; // fa
const F2: u8 = 25; // fal
const F3: u8 = 26; // fals
const F4: u8 = 27; // false
const N1: u8 = 28; // nu
const N2: u8 = 29; // nul
const N3: u8 = 30; // null
const C1: u8 = 31; // after / of a C-style comment
const C2: u8 = 32; // inside a C-style comment
const C3: u8 = 33; // inside a C-style comment, after *
const Y1: u8 = 34; // inside a YAML-style comment
const D1: u8 = 35; // after a high surrogate, expect backslash
const D2: u8 = 36; // after a high surrogate, expect u

const NR_STATES: usize = (D2 as usize) + 1;

// The actions. A transition-table cell with the high bit set is an action
// code rather than a plain state change; the dispatcher decides the next
// state itself.
const KS: u8 = 0x80; // key-value separator (colon)
const SP: u8 = 0x81; // item separator (comma)
const AB: u8 = 0x82; // array begin
const AE: u8 = 0x83; // array end
const OB: u8 = 0x84; // object begin
const OE: u8 = 0x85; // object end
const CB: u8 = 0x86; // C-style comment begin
const YB: u8 = 0x87; // YAML-style comment begin
const CE: u8 = 0x88; // comment end
const FA: u8 = 0x89; // false complete
const TR: u8 = 0x8A; // true complete
const NU: u8 = 0x8B; // null complete
const DE: u8 = 0x8C; // number became a float via exponent
const DF: u8 = 0x8D; // number became a float via decimal point
const SE: u8 = 0x8E; // string end (closing quote)
const MX: u8 = 0x8F; // integer begins with -
const ZX: u8 = 0x90; // integer begins with 0
const IX: u8 = 0x91; // integer begins with 1-9
const UC: u8 = 0x92; // four hex digits of a unicode escape complete

/// The state transition table takes the current state and the current
/// character class and returns either a new state or an action (high bit
/// set). `__` is a syntax error. Kept as a flat array indexed by
/// `state * NR_CLASSES + class`.
#[rustfmt::skip]
const STATE_TRANSITION_TABLE: [u8; NR_STATES * NR_CLASSES] = [
/*           sp  nl  wh   {   }   [   ]   :   ,   "   \   /   +   -   .   0  19   a   b   c   d   e   f   l   n   r   s   t   u ABCDF E etc   *   # */
/*start GO*/ GO, GO, GO, OB, __, AB, __, __, SP, _S, __, CB, __, MX, __, ZX, IX, __, __, __, __, __, F1, __, N1, __, __, T1, __, __, __, __, __, YB,
/*ok    OK*/ OK, OK, OK, __, OE, __, AE, __, SP, __, __, CB, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, YB,
/*objct _O*/ _O, _O, _O, __, OE, __, __, __, __, _S, __, CB, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, YB,
/*key   _K*/ _K, _K, _K, __, __, __, __, __, __, _S, __, CB, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, YB,
/*colon CO*/ CO, CO, CO, __, __, __, __, KS, __, __, __, CB, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, YB,
/*value _V*/ _V, _V, _V, OB, __, AB, __, __, __, _S, __, CB, __, MX, __, ZX, IX, __, __, __, __, __, F1, __, N1, __, __, T1, __, __, __, __, __, YB,
/*array _A*/ _A, _A, _A, OB, __, AB, AE, __, __, _S, __, CB, __, MX, __, ZX, IX, __, __, __, __, __, F1, __, N1, __, __, T1, __, __, __, __, __, YB,
/*strng _S*/ _S, __, __, _S, _S, _S, _S, _S, _S, SE, E0, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S, _S,
/*escap E0*/ __, __, __, __, __, __, __, __, __, _S, _S, _S, __, __, __, __, __, __, _S, __, __, __, _S, __, _S, _S, __, _S, U1, __, __, __, __, __,
/*u1    U1*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, U2, U2, U2, U2, U2, U2, U2, U2, __, __, __, __, __, __, U2, U2, __, __, __,
/*u2    U2*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, U3, U3, U3, U3, U3, U3, U3, U3, __, __, __, __, __, __, U3, U3, __, __, __,
/*u3    U3*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, U4, U4, U4, U4, U4, U4, U4, U4, __, __, __, __, __, __, U4, U4, __, __, __,
/*u4    U4*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, UC, UC, UC, UC, UC, UC, UC, UC, __, __, __, __, __, __, UC, UC, __, __, __,
/*minus M0*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, Z0, I0, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
/*zero  Z0*/ OK, OK, OK, __, OE, __, AE, __, SP, __, __, CB, __, __, DF, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, YB,
/*int   I0*/ OK, OK, OK, __, OE, __, AE, __, SP, __, __, CB, __, __, DF, I0, I0, __, __, __, __, DE, __, __, __, __, __, __, __, __, DE, __, __, YB,
/*frac0 R1*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, R2, R2, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
/*frac  R2*/ OK, OK, OK, __, OE, __, AE, __, SP, __, __, CB, __, __, __, R2, R2, __, __, __, __, X1, __, __, __, __, __, __, __, __, X1, __, __, YB,
/*e     X1*/ __, __, __, __, __, __, __, __, __, __, __, __, X2, X2, __, X3, X3, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
/*ex    X2*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, X3, X3, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
/*exp   X3*/ OK, OK, OK, __, OE, __, AE, __, SP, __, __, __, __, __, __, X3, X3, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
/*tr    T1*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, T2, __, __, __, __, __, __, __, __,
/*tru   T2*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, T3, __, __, __, __, __,
/*true  T3*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, TR, __, __, __, __, __, __, __, __, __, __, __, __,
/*fa    F1*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F2, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
/*fal   F2*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F3, __, __, __, __, __, __, __, __, __, __,
/*fals  F3*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F4, __, __, __, __, __, __, __,
/*false F4*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, FA, __, __, __, __, __, __, __, __, __, __, __, __,
/*nu    N1*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, N2, __, __, __, __, __,
/*nul   N2*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, N3, __, __, __, __, __, __, __, __, __, __,
/*null  N3*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, NU, __, __, __, __, __, __, __, __, __, __,
/*com   C1*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, C2, __,
/*com   C2*/ C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C3, C2,
/*com   C3*/ C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, CE, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C2, C3, C2,
/*com   Y1*/ Y1, CE, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1, Y1,
/*surr  D1*/ __, __, __, __, __, __, __, __, __, __, D2, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
/*surr  D2*/ __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, U1, __, __, __, __, __,
];

/// The buffer policy table is parallel to the transition table and tells the
/// parser what to do with the input byte: 0 = drop it, 1 = append it to the
/// token buffer, 2 = append its escaped meaning.
#[rustfmt::skip]
const BUFFER_POLICY_TABLE: [u8; NR_STATES * NR_CLASSES] = [
/*          sp nl wh  {  }  [  ]  :  ,  "  \  /  +  -  .  0 19  a  b  c  d  e  f  l  n  r  s  t  u ABCDF E etc *  # */
/*start GO*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*ok    OK*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*objct _O*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*key   _K*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*colon CO*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*value _V*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*array _A*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*strng _S*/ 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
/*escap E0*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 2, 0, 2, 2, 0, 2, 0, 0, 0, 0, 0, 0,
/*u1    U1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0,
/*u2    U2*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0,
/*u3    U3*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0,
/*u4    U4*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0,
/*minus M0*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*zero  Z0*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*int   I0*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0,
/*frac0 R1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*frac  R2*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0,
/*e     X1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*ex    X2*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*exp   X3*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*tr    T1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*tru   T2*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*true  T3*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*fa    F1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*fal   F2*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*fals  F3*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*false F4*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*nu    N1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*nul   N2*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*null  N3*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*com   C1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*com   C2*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*com   C3*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*com   Y1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*surr  D1*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/*surr  D2*/ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

const DEFAULT_STACK_SIZE: usize = 256;
const DEFAULT_BUFFER_SIZE: usize = 4096;

/// An error that can happen during parsing. Errors are not recoverable: once
/// `feed` has returned one, the parser must be discarded.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The JSON text contains an illegal byte (e.g. a non-whitespace control
    /// character)
    #[error("JSON text contains an illegal byte: 0x{0:02x}")]
    BadChar(u8),

    /// A byte was legal but not valid in the current state
    #[error("unexpected character: 0x{0:02x}")]
    UnexpectedChar(u8),

    /// A closing bracket or brace appeared outside of any container
    #[error("closing token outside of any object or array")]
    PopEmpty,

    /// A closing bracket or brace did not match the innermost container
    #[error("closing token does not match the open object or array")]
    PopUnexpectedMode,

    /// The document nests deeper than the configured `max_nesting`
    #[error("maximum nesting depth exceeded")]
    NestingLimit,

    /// A single string, field name, or number is longer than the configured
    /// `max_data`
    #[error("maximum primitive length exceeded")]
    DataLimit,

    /// A comment was found but comments are not enabled in the parser options
    #[error("comment not allowed by the parser options")]
    CommentNotAllowed,

    /// A `\uXXXX` high surrogate was not followed by a low surrogate
    #[error("missing unicode low surrogate")]
    UnicodeMissingLowSurrogate,

    /// A `\uXXXX` low surrogate appeared without a preceding high surrogate
    #[error("unexpected unicode low surrogate")]
    UnicodeUnexpectedLowSurrogate,

    /// A comma appeared outside of any object or array
    #[error("comma outside of any object or array")]
    CommaOutOfStructure,

    /// The event sink returned an error
    #[error("event sink aborted parsing: {0}")]
    Callback(#[from] SinkError),
}

/// The nesting modes that can be pushed on the stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Array,
    Object,
}

/// The stack of open containers, innermost on top. A configured `max_nesting`
/// is a hard preallocation: the stack is never grown beyond it.
struct ModeStack {
    stack: Vec<Mode>,
    max_nesting: usize,
}

impl ModeStack {
    fn new(max_nesting: usize) -> Self {
        let capacity = if max_nesting > 0 {
            max_nesting
        } else {
            DEFAULT_STACK_SIZE
        };
        ModeStack {
            stack: Vec::with_capacity(capacity),
            max_nesting,
        }
    }

    fn push(&mut self, mode: Mode) -> Result<(), ParseError> {
        if self.max_nesting > 0 && self.stack.len() >= self.max_nesting {
            return Err(ParseError::NestingLimit);
        }
        self.stack.push(mode);
        Ok(())
    }

    /// Pop the stack, assuring that the innermost mode matches the
    /// expectation. This is what catches `{...]` and `[...}`.
    fn pop(&mut self, expected: Mode) -> Result<(), ParseError> {
        match self.stack.pop() {
            None => Err(ParseError::PopEmpty),
            Some(top) if top != expected => Err(ParseError::PopUnexpectedMode),
            Some(_) => Ok(()),
        }
    }

    fn top(&self) -> Option<Mode> {
        self.stack.last().copied()
    }

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Accumulates the bytes of the primitive currently being lexed. Doubles on
/// demand; when `max_data` is non-zero, growth is capped there and a push
/// beyond it fails.
struct TokenBuffer {
    buf: Vec<u8>,
    max_data: usize,
}

impl TokenBuffer {
    fn new(initial_size: usize, max_data: usize) -> Self {
        TokenBuffer {
            buf: Vec::with_capacity(initial_size),
            max_data,
        }
    }

    fn push(&mut self, c: u8) -> Result<(), ParseError> {
        if self.buf.len() == self.buf.capacity() {
            self.grow()?;
        }
        self.buf.push(c);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), ParseError> {
        let capacity = self.buf.capacity();
        if self.max_data > 0 && capacity >= self.max_data {
            return Err(ParseError::DataLimit);
        }
        let mut new_size = capacity.max(1) * 2;
        if self.max_data > 0 && new_size > self.max_data {
            new_size = self.max_data;
        }
        self.buf.reserve_exact(new_size - self.buf.len());
        Ok(())
    }

    fn is_full(&self) -> bool {
        self.buf.len() == self.buf.capacity()
    }

    fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    fn clear(&mut self) {
        self.buf.clear();
    }
}

/// The kind of the primitive currently being lexed. Set by the lex-start
/// actions and consumed by the flush that emits the event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pending {
    Int,
    Float,
    True,
    False,
    Null,
}

/// Value of a hex digit. The transition table only routes the classes
/// `0 1-9 a-f A-F` into the unicode states, so other bytes cannot reach this.
fn hex_value(c: u8) -> u16 {
    match c {
        b'0'..=b'9' => (c - b'0') as u16,
        b'a'..=b'f' => (c - b'a' + 10) as u16,
        _ => (c - b'A' + 10) as u16,
    }
}

fn is_high_surrogate(uc: u16) -> bool {
    uc & 0xFC00 == 0xD800
}

fn is_low_surrogate(uc: u16) -> bool {
    uc & 0xFC00 == 0xDC00
}

/// A streaming, push-based JSON parser.
///
/// Bytes go in through [`feed()`](Self::feed()) in chunks of any size, split
/// at any position; events come out through the [`EventSink`] passed to the
/// constructor, in document order, on the same call stack.
pub struct JsonParser<S> {
    /// The sink receiving the events
    pub sink: S,

    /// The stack containing the current modes
    stack: ModeStack,

    /// Collects the bytes of the primitive currently being lexed
    buffer: TokenBuffer,

    /// The current state
    state: u8,

    /// The state to restore when a comment closes
    saved_state: u8,

    /// The kind of the primitive currently being lexed
    pending: Option<Pending>,

    /// `true` if the next string must be emitted as a field name
    expecting_key: bool,

    /// A latched `\uXXXX` high surrogate waiting for its low surrogate
    surrogate: Option<u16>,

    /// Start of the current token in the current input chunk (in-place mode)
    token_start: Option<usize>,

    /// Tracks the number of bytes that have been accepted. When `feed`
    /// returns an error, this is the offset of the offending byte.
    parsed_bytes: usize,

    options: JsonParserOptions,
}

impl<S> JsonParser<S>
where
    S: EventSink,
{
    /// Create a new JSON parser pushing events into the given sink
    pub fn new(sink: S) -> Self {
        Self::new_with_options(sink, JsonParserOptions::default())
    }

    /// Create a new JSON parser with the given [`JsonParserOptions`]
    pub fn new_with_options(sink: S, options: JsonParserOptions) -> Self {
        // the token buffer is unused in in-place mode and unbounded in
        // partial-data mode, where it is recycled instead of grown
        let max_data = if options.mode == ParseMode::Buffered {
            options.max_data
        } else {
            0
        };
        let mut initial_size = if options.buffer_initial_size > 0 {
            options.buffer_initial_size
        } else {
            DEFAULT_BUFFER_SIZE
        };
        if max_data > 0 && initial_size > max_data {
            initial_size = max_data;
        }
        JsonParser {
            sink,
            stack: ModeStack::new(options.max_nesting),
            buffer: TokenBuffer::new(initial_size, max_data),
            state: GO,
            saved_state: GO,
            pending: None,
            expecting_key: false,
            surrogate: None,
            token_start: None,
            parsed_bytes: 0,
            options,
        }
    }

    /// Consume a chunk of input. Events are pushed into the sink while the
    /// chunk is processed. On error, [`parsed_bytes()`](Self::parsed_bytes())
    /// gives the offset of the offending byte; the parser must then be
    /// discarded.
    pub fn feed(&mut self, buf: &[u8]) -> Result<(), ParseError> {
        if self.options.mode == ParseMode::InPlace && Self::in_token(self.state) {
            self.token_start = Some(0);
        }
        for (i, &ch) in buf.iter().enumerate() {
            let r = if self.state == _S
                && self.options.mode == ParseMode::Buffered
                && ch >= 0x20
                && ch != b'"'
                && ch != b'\\'
            {
                // shortcut: plain string content
                self.buffer.push(ch)
            } else {
                self.parse_byte(buf, i, ch)
            };
            if let Err(e) = r {
                self.parsed_bytes += i;
                return Err(e);
            }
        }
        self.parsed_bytes += buf.len();
        self.end_of_chunk(buf)
    }

    /// Convenience wrapper feeding a single byte
    pub fn feed_byte(&mut self, b: u8) -> Result<(), ParseError> {
        self.feed(std::slice::from_ref(&b))
    }

    /// Signal the end of the input. A number or literal that ends a top-level
    /// document has no delimiter byte to force its event out; this emits it.
    /// Calling `finish` on an incomplete document is not an error — use
    /// [`is_done()`](Self::is_done()) to check for completeness.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        if self.pending.is_some() && self.stack.is_empty() && Self::is_terminal(self.state) {
            self.flush(&[], 0)?;
            self.state = OK;
        }
        Ok(())
    }

    /// `true` if the input consumed so far forms exactly one complete JSON
    /// value. `false` if nothing has been fed yet, a container is still open,
    /// or the last token cannot end here (e.g. `12.`).
    pub fn is_done(&self) -> bool {
        self.stack.is_empty() && Self::is_terminal(self.state)
    }

    /// Return the number of bytes accepted so far. After a `feed` error this
    /// is the offset of the byte that caused it, which callers can map to a
    /// line and column.
    pub fn parsed_bytes(&self) -> usize {
        self.parsed_bytes
    }

    /// Consume the parser and return the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// States in which a value just completed at the top level
    fn is_terminal(state: u8) -> bool {
        state == OK || state == Z0 || state == I0 || state == R2 || state == X3
    }

    /// States in which the parser is in the middle of a string or number
    fn in_token(state: u8) -> bool {
        (_S..=X3).contains(&state) || state == D1 || state == D2
    }

    /// This function is called for each input byte: classify it, look up the
    /// transition, apply the buffer policy, and run the action if the cell is
    /// an action code.
    fn parse_byte(&mut self, buf: &[u8], i: usize, ch: u8) -> Result<(), ParseError> {
        let next_class = if ch >= 128 {
            C_ETC
        } else {
            ASCII_CLASS[ch as usize]
        };
        if next_class == __ {
            return Err(ParseError::BadChar(ch));
        }

        let index = self.state as usize * NR_CLASSES + next_class as usize;
        let next_state = STATE_TRANSITION_TABLE[index];
        if next_state == __ {
            return Err(ParseError::UnexpectedChar(ch));
        }

        match BUFFER_POLICY_TABLE[index] {
            1 => self.push_token_byte(ch)?,
            2 => self.push_escape_byte(ch)?,
            _ => {}
        }

        if next_state & 0x80 != 0 {
            self.perform_action(next_state, buf, i)?;
        } else {
            if next_state == OK && self.pending.is_some() {
                // a delimiting whitespace completed the current primitive
                self.flush(buf, i)?;
            }
            if self.options.mode == ParseMode::InPlace
                && next_state == _S
                && self.state < _S
            {
                // opening quote; the payload starts at the next byte
                self.token_start = Some(i + 1);
            }
            self.state = next_state;
        }

        Ok(())
    }

    /// Append a raw byte to the token buffer (policy 1)
    fn push_token_byte(&mut self, ch: u8) -> Result<(), ParseError> {
        match self.options.mode {
            ParseMode::InPlace => Ok(()),
            ParseMode::PartialData => {
                if self.buffer.is_full()
                    && !self.buffer.is_empty()
                    && !(U1..=U4).contains(&self.state)
                {
                    let ev = Self::partial_event(
                        self.state,
                        self.expecting_key,
                        self.buffer.as_slice(),
                    );
                    self.sink.event(ev)?;
                    self.buffer.clear();
                }
                self.buffer.push(ch)
            }
            ParseMode::Buffered => self.buffer.push(ch),
        }
    }

    /// Append the decoded meaning of an escape character (policy 2)
    fn push_escape_byte(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.options.mode == ParseMode::InPlace {
            return Ok(());
        }
        let c = match ch {
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => 0x0A,
            b'r' => 0x0D,
            b't' => 0x09,
            // the table routes only " / \ here otherwise
            _ => ch,
        };
        self.push_token_byte(c)
    }

    /// Perform the side effect of an action code and set the next state
    fn perform_action(&mut self, action: u8, buf: &[u8], i: usize) -> Result<(), ParseError> {
        match action {
            // : between key and value
            KS => {
                self.state = _V;
            }

            // , between items; flips an object back to key mode
            SP => {
                self.flush(buf, i)?;
                match self.stack.top() {
                    Some(Mode::Object) => {
                        self.expecting_key = true;
                        self.state = _K;
                    }
                    Some(Mode::Array) => {
                        self.state = _V;
                    }
                    None => return Err(ParseError::CommaOutOfStructure),
                }
            }

            // [
            AB => {
                self.sink.event(JsonEvent::StartArray)?;
                self.stack.push(Mode::Array)?;
                self.state = _A;
            }

            // ]
            AE => {
                self.flush(buf, i)?;
                self.sink.event(JsonEvent::EndArray)?;
                self.stack.pop(Mode::Array)?;
                self.state = OK;
            }

            // {
            OB => {
                self.sink.event(JsonEvent::StartObject)?;
                self.stack.push(Mode::Object)?;
                self.expecting_key = true;
                self.state = _O;
            }

            // }
            OE => {
                self.flush(buf, i)?;
                self.sink.event(JsonEvent::EndObject)?;
                self.stack.pop(Mode::Object)?;
                self.expecting_key = false;
                self.state = OK;
            }

            // /* ... */
            CB => {
                self.flush(buf, i)?;
                if !self.options.allow_c_comments {
                    return Err(ParseError::CommentNotAllowed);
                }
                self.saved_state = self.state;
                self.state = C1;
            }

            // # ... to end of line
            YB => {
                self.flush(buf, i)?;
                if !self.options.allow_yaml_comments {
                    return Err(ParseError::CommentNotAllowed);
                }
                self.saved_state = self.state;
                self.state = Y1;
            }

            // end of a comment. A comment that interrupted a primitive or a
            // container position (any state after _A) resumes at the
            // value-complete point, since the primitive was flushed when the
            // comment opened.
            CE => {
                self.state = if self.saved_state > _A {
                    OK
                } else {
                    self.saved_state
                };
            }

            FA => {
                self.pending = Some(Pending::False);
                self.state = OK;
            }

            TR => {
                self.pending = Some(Pending::True);
                self.state = OK;
            }

            NU => {
                self.pending = Some(Pending::Null);
                self.state = OK;
            }

            // number turned into a float by an exponent
            DE => {
                self.pending = Some(Pending::Float);
                self.state = X1;
            }

            // number turned into a float by a decimal point
            DF => {
                self.pending = Some(Pending::Float);
                self.state = R1;
            }

            // closing quote
            SE => {
                let payload: &[u8] = match self.options.mode {
                    ParseMode::InPlace => {
                        let start = self.token_start.take().unwrap_or(i);
                        &buf[start..i]
                    }
                    _ => self.buffer.as_slice(),
                };
                let expecting_key = self.expecting_key;
                self.sink.event(if expecting_key {
                    JsonEvent::FieldName(payload)
                } else {
                    JsonEvent::ValueString(payload)
                })?;
                self.buffer.clear();
                self.state = if expecting_key { CO } else { OK };
                self.expecting_key = false;
            }

            MX => {
                self.pending = Some(Pending::Int);
                if self.options.mode == ParseMode::InPlace {
                    self.token_start = Some(i);
                }
                self.state = M0;
            }

            ZX => {
                self.pending = Some(Pending::Int);
                if self.options.mode == ParseMode::InPlace {
                    self.token_start = Some(i);
                }
                self.state = Z0;
            }

            IX => {
                self.pending = Some(Pending::Int);
                if self.options.mode == ParseMode::InPlace {
                    self.token_start = Some(i);
                }
                self.state = I0;
            }

            // four hex digits of a \uXXXX escape are complete
            UC => {
                if self.options.mode == ParseMode::InPlace {
                    // escapes stay undecoded; the raw bytes are already part
                    // of the token span
                    self.state = _S;
                } else {
                    self.decode_unicode_escape()?;
                    self.state = if self.surrogate.is_some() { D1 } else { _S };
                }
            }

            // the tables contain no other action codes
            _ => unreachable!("invalid action code: {action:#x}"),
        }

        Ok(())
    }

    /// Emit the pending primitive, if any, and reset the token buffer. Called
    /// by the delimiter actions and when whitespace completes a number or
    /// literal.
    fn flush(&mut self, buf: &[u8], end: usize) -> Result<(), ParseError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let data: &[u8] = match self.options.mode {
            ParseMode::InPlace => {
                let start = self.token_start.take().unwrap_or(end);
                &buf[start..end]
            }
            _ => self.buffer.as_slice(),
        };
        let event = match pending {
            Pending::Int => JsonEvent::ValueInt(data),
            Pending::Float => JsonEvent::ValueFloat(data),
            Pending::True => JsonEvent::ValueTrue,
            Pending::False => JsonEvent::ValueFalse,
            Pending::Null => JsonEvent::ValueNull,
        };
        self.sink.event(event)?;
        self.buffer.clear();
        Ok(())
    }

    /// The fragment event matching the token being lexed in `state`
    fn partial_event<'a>(state: u8, expecting_key: bool, data: &'a [u8]) -> JsonEvent<'a> {
        if (M0..=X3).contains(&state) {
            JsonEvent::PartialValue(data)
        } else if expecting_key {
            JsonEvent::PartialFieldName(data)
        } else {
            JsonEvent::PartialString(data)
        }
    }

    /// In the non-default modes, hand out the bytes of a token cut by the end
    /// of the chunk, so nothing is retained (partial-data) or borrowed
    /// (in-place) across `feed` calls.
    fn end_of_chunk(&mut self, buf: &[u8]) -> Result<(), ParseError> {
        match self.options.mode {
            ParseMode::Buffered => {}
            ParseMode::PartialData => {
                // hex digits of an unfinished \uXXXX escape stay buffered
                if Self::in_token(self.state)
                    && !(U1..=U4).contains(&self.state)
                    && !self.buffer.is_empty()
                {
                    let ev = Self::partial_event(
                        self.state,
                        self.expecting_key,
                        self.buffer.as_slice(),
                    );
                    self.sink.event(ev)?;
                    self.buffer.clear();
                }
            }
            ParseMode::InPlace => {
                if Self::in_token(self.state) {
                    if let Some(start) = self.token_start.take() {
                        if start < buf.len() {
                            let ev = Self::partial_event(
                                self.state,
                                self.expecting_key,
                                &buf[start..],
                            );
                            self.sink.event(ev)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Transform the four hex digits at the end of the buffer into UTF-8
    /// bytes, latching high surrogates until their low surrogate arrives.
    fn decode_unicode_escape(&mut self) -> Result<(), ParseError> {
        let n = self.buffer.len();
        let b = self.buffer.as_slice();
        let uval = (hex_value(b[n - 4]) << 12)
            | (hex_value(b[n - 3]) << 8)
            | (hex_value(b[n - 2]) << 4)
            | hex_value(b[n - 1]);
        self.buffer.truncate(n - 4);

        // fast case
        if self.surrogate.is_none() && uval < 0x80 {
            self.buffer.push(uval as u8)?;
            return Ok(());
        }

        if let Some(high) = self.surrogate.take() {
            if !is_low_surrogate(uval) {
                return Err(ParseError::UnicodeMissingLowSurrogate);
            }
            let uval = 0x10000 + (((high as u32 & 0x3FF) << 10) | (uval as u32 & 0x3FF));
            self.buffer.push((uval >> 18) as u8 | 0xF0)?;
            self.buffer.push(((uval >> 12) & 0x3F) as u8 | 0x80)?;
            self.buffer.push(((uval >> 6) & 0x3F) as u8 | 0x80)?;
            self.buffer.push((uval & 0x3F) as u8 | 0x80)?;
            return Ok(());
        }

        if is_low_surrogate(uval) {
            return Err(ParseError::UnicodeUnexpectedLowSurrogate);
        }
        if is_high_surrogate(uval) {
            self.surrogate = Some(uval);
            return Ok(());
        }

        if uval < 0x800 {
            self.buffer.push((uval >> 6) as u8 | 0xC0)?;
            self.buffer.push((uval & 0x3F) as u8 | 0x80)?;
        } else {
            self.buffer.push((uval >> 12) as u8 | 0xE0)?;
            self.buffer.push(((uval >> 6) & 0x3F) as u8 | 0x80)?;
            self.buffer.push((uval & 0x3F) as u8 | 0x80)?;
        }
        Ok(())
    }
}
