/// Controls how the [`JsonParser`](crate::JsonParser) hands payload bytes to
/// the sink.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
    /// Accumulate each string, field name, and number in the parser's token
    /// buffer and emit it as a single event with escapes decoded.
    #[default]
    Buffered,

    /// Never retain payload bytes between calls to
    /// [`feed()`](crate::JsonParser::feed()): whenever the token buffer would
    /// have to grow, and at the end of every `feed()` call while a primitive
    /// is still being lexed, the buffered bytes are emitted as a
    /// [`PartialFieldName`](crate::JsonEvent::PartialFieldName),
    /// [`PartialString`](crate::JsonEvent::PartialString) or
    /// [`PartialValue`](crate::JsonEvent::PartialValue) event and the buffer
    /// is reset. Escapes are still decoded; `max_data` does not apply.
    PartialData,

    /// Bypass the token buffer entirely. Payloads are subslices of the bytes
    /// passed to [`feed()`](crate::JsonParser::feed()), with escape sequences
    /// left undecoded (and surrogate pairs unvalidated). A token cut by the
    /// end of a chunk is emitted as a partial event before `feed()` returns.
    InPlace,
}

/// Options for [`JsonParser`](crate::JsonParser). Use
/// [`JsonParserOptionsBuilder`] to create instances of this struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JsonParserOptions {
    /// The maximum depth of the mode stack (0 = unbounded)
    pub(crate) max_nesting: usize,

    /// The maximum byte length of a single primitive (0 = unbounded)
    pub(crate) max_data: usize,

    /// The initial size of the token buffer (0 = implementation default)
    pub(crate) buffer_initial_size: usize,

    /// `true` if `/* ... */` comments should be tolerated
    pub(crate) allow_c_comments: bool,

    /// `true` if `# ...` comments (to end of line) should be tolerated
    pub(crate) allow_yaml_comments: bool,

    /// How payload bytes are handed to the sink
    pub(crate) mode: ParseMode,
}

impl Default for JsonParserOptions {
    /// Returns default JSON parser options: no limits, no comments, buffered
    /// payloads
    fn default() -> Self {
        Self {
            max_nesting: 0,
            max_data: 0,
            buffer_initial_size: 0,
            allow_c_comments: false,
            allow_yaml_comments: false,
            mode: ParseMode::Buffered,
        }
    }
}

impl JsonParserOptions {
    /// Returns the maximum depth of the mode stack (0 = unbounded). A
    /// non-zero value is a hard preallocation: the stack never grows beyond
    /// it and a document nesting deeper fails with
    /// [`ParseError::NestingLimit`](crate::ParseError::NestingLimit).
    pub fn max_nesting(&self) -> usize {
        self.max_nesting
    }

    /// Returns the maximum byte length of a single string, field name, or
    /// number (0 = unbounded). Longer primitives fail with
    /// [`ParseError::DataLimit`](crate::ParseError::DataLimit).
    pub fn max_data(&self) -> usize {
        self.max_data
    }

    /// Returns the initial size of the token buffer (0 = implementation
    /// default)
    pub fn buffer_initial_size(&self) -> usize {
        self.buffer_initial_size
    }

    /// Returns `true` if `/* ... */` comments are tolerated
    pub fn allow_c_comments(&self) -> bool {
        self.allow_c_comments
    }

    /// Returns `true` if `# ...` comments are tolerated
    pub fn allow_yaml_comments(&self) -> bool {
        self.allow_yaml_comments
    }

    /// Returns how payload bytes are handed to the sink
    pub fn mode(&self) -> ParseMode {
        self.mode
    }
}

/// A builder for [`JsonParserOptions`]
///
/// ```rust
/// use jsonpush::options::JsonParserOptionsBuilder;
/// use jsonpush::sink::NullSink;
/// use jsonpush::JsonParser;
///
/// let mut parser = JsonParser::new_with_options(
///     NullSink,
///     JsonParserOptionsBuilder::default()
///         .with_max_nesting(16)
///         .with_allow_c_comments(true)
///         .build(),
/// );
/// ```
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct JsonParserOptionsBuilder {
    options: JsonParserOptions,
}

impl JsonParserOptionsBuilder {
    /// Set the maximum depth of the mode stack (0 = unbounded)
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.options.max_nesting = max_nesting;
        self
    }

    /// Set the maximum byte length of a single primitive (0 = unbounded)
    pub fn with_max_data(mut self, max_data: usize) -> Self {
        self.options.max_data = max_data;
        self
    }

    /// Set the initial size of the token buffer (0 = implementation default)
    pub fn with_buffer_initial_size(mut self, buffer_initial_size: usize) -> Self {
        self.options.buffer_initial_size = buffer_initial_size;
        self
    }

    /// Tolerate C-style comments (`/* ... */`) between tokens
    pub fn with_allow_c_comments(mut self, allow_c_comments: bool) -> Self {
        self.options.allow_c_comments = allow_c_comments;
        self
    }

    /// Tolerate YAML-style comments (`# ...` to end of line) between tokens
    pub fn with_allow_yaml_comments(mut self, allow_yaml_comments: bool) -> Self {
        self.options.allow_yaml_comments = allow_yaml_comments;
        self
    }

    /// Set how payload bytes are handed to the sink
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.options.mode = mode;
        self
    }

    /// Create a new [`JsonParserOptions`] object
    pub fn build(self) -> JsonParserOptions {
        self.options
    }
}
