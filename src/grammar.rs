//! Tesira Text Protocol value syntax
//!
//! This module documents the value syntax carried inside TTP command and
//! response lines, as implemented by this crate. Command framing (`+OK`,
//! `-ERR`, `! "publishToken"...`, line feeds) belongs to the transport and is
//! not parsed here: callers hand over the value part only.
//!
//! # Grammar
//!
//! ```text
//! value         := scalar | control | array
//! control       := '{' (keyed_value (ws keyed_value)*)? '}'
//! array         := '[' (value (ws value)*)? ']'
//! keyed_value   := quoted_key ':' ws? value
//! quoted_key    := '"' chars-without-unescaped-quote '"'
//! scalar        := quoted_string | bareword
//! quoted_string := '"' (escaped_char | any_char_except_quote)* '"'
//! bareword      := any_char_except_whitespace_or_structural+
//! escaped_char  := '\' any_char
//! ```
//!
//! `{`, `}`, `[`, `]`, `"`, `:` and ASCII whitespace are structural outside
//! quotes and escapes.
//!
//! # Controls
//!
//! A control is the protocol's keyed object. Keys are always quoted; items
//! are separated by whitespace, not commas:
//!
//! ```rust
//! use tesira_ttp::deserialize_value;
//!
//! let value = deserialize_value("{\"deviceId\":0 \"classCode\":0 \"instanceNum\":0}").unwrap();
//! assert_eq!(value.len(), Some(3));
//! ```
//!
//! Some devices send values with spaces but without quotes. Such a value is
//! rejoined with its key because the next piece carries no colon:
//!
//! ```rust
//! use tesira_ttp::deserialize_value;
//!
//! let value = deserialize_value("{\"hostname\":Tesira Server 1 \"id\":3}").unwrap();
//! assert_eq!(value.get("hostname").unwrap().to_wire(), "Tesira Server 1");
//! ```
//!
//! # Arrays
//!
//! Arrays are whitespace separated and may mix every kind of value:
//!
//! ```rust
//! use tesira_ttp::deserialize_value;
//!
//! let value = deserialize_value("[10 {\"A\":1 \"B\":2} [1 2]]").unwrap();
//! assert!(value.at(1).unwrap().is_control());
//! ```
//!
//! # Scalars
//!
//! | Shape | Example | Accessor |
//! |-------|---------|----------|
//! | Integer | `3` | `as_i64` |
//! | Float | `-100.000000` | `as_f64` |
//! | Boolean | `true` | `as_bool` |
//! | String | `"Level1"` | `as_string` |
//! | Date-time | `13:45:07:03:21:2024` (`HH:mm:ss:MM:dd:yyyy`) | `as_datetime` |
//! | Packed strings | `"\"a\"\"b\""` | `string_values` |
//! | Enumeration | `LOGIC_ON` | raw text |
//!
//! The raw text is stored as received. A quoted `"10"` is a string, not a
//! number:
//!
//! ```rust
//! use tesira_ttp::deserialize_value;
//!
//! assert!(deserialize_value("\"10\"").unwrap().as_i64().is_err());
//! assert_eq!(deserialize_value("10").unwrap().as_i64().unwrap(), 10);
//! ```
//!
//! # Escapes
//!
//! A backslash makes the next character literal, inside or outside quotes.
//! There are no named escapes such as `\n`.
//!
//! Keys follow the same rule. A decoded control holds its keys unescaped, and
//! encoding escapes `"` and `\` again:
//!
//! ```rust
//! use tesira_ttp::deserialize_value;
//!
//! let value = deserialize_value("{\"say \\\"hi\\\"\":1}").unwrap();
//! assert_eq!(value.get("say \"hi\"").unwrap().as_i64().unwrap(), 1);
//! ```
//!
//! # Leading keys
//!
//! A response such as `+OK "value":-10.5` carries its payload behind a key.
//! The dispatcher drops a leading `"key":` before looking at the value:
//!
//! ```rust
//! use tesira_ttp::deserialize_value;
//!
//! assert_eq!(deserialize_value("\"value\":-10.5").unwrap().as_f64().unwrap(), -10.5);
//! ```
