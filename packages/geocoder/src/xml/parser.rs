//! Streaming response parser.
//!
//! Reads the service response as a stream of XML events instead of
//! building a document tree. The parser keeps the name of the most
//! recently started element plus an [`ElementStack`] of its ancestors,
//! captures the service status from `code` elements, and hands every
//! non-empty text node to a caller-supplied extraction policy.

use std::borrow::Cow;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::stack::ElementStack;
use crate::config::{STATUS_ELEMENT, SUCCESS_STATUS};
use crate::error::{GeocoderError, Result};

/// Lifecycle of a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// No element has been seen yet.
    NotStarted,
    /// At least one element has started.
    InProgress,
    /// Document ended and the service status was acceptable.
    Completed,
    /// Parsing stopped with an error.
    Failed,
}

impl ParseState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A non-empty text node as seen by an extraction policy.
#[derive(Debug, Clone, Copy)]
pub struct TextNode<'a> {
    /// Name of the most recently started element.
    pub element: &'a str,
    /// Text content with surrounding whitespace removed.
    pub text: &'a str,
    /// Names of the enclosing elements, outermost first.
    pub ancestors: &'a ElementStack,
}

/// Event-driven state of one response parse.
///
/// [`parse`] drives this from an XML stream. The step methods are public
/// so the event handling can be driven without XML.
///
/// On an end event only the stack is popped: the current element name
/// keeps the last started element until the next start event.
#[derive(Debug)]
pub struct ResponseParser {
    stack: ElementStack,
    current: Option<String>,
    status: Option<String>,
    state: ParseState,
    open: usize,
    root_closed: bool,
    policy_error: Option<GeocoderError>,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: ElementStack::new(),
            current: None,
            status: None,
            state: ParseState::NotStarted,
            open: 0,
            root_closed: false,
            policy_error: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Status captured from the last non-empty `code` text, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn current_element(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn stack(&self) -> &ElementStack {
        &self.stack
    }

    /// Handle a start element event.
    ///
    /// Fails if the root element has already been closed.
    pub fn start_element(&mut self, name: impl Into<String>) -> Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }
        let name = name.into();
        if self.root_closed {
            self.state = ParseState::Failed;
            return Err(GeocoderError::ContentOutsideRoot(format!("<{name}>")));
        }
        tracing::trace!(element = %name, depth = self.stack.len(), "Start element");

        if let Some(previous) = self.current.replace(name) {
            self.stack.push(previous);
        }
        self.open += 1;
        self.state = ParseState::InProgress;
        Ok(())
    }

    /// Handle an end element event.
    pub fn end_element(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        tracing::trace!(depth = self.stack.len(), "End element");

        self.stack.pop();
        if self.open == 1 {
            self.root_closed = true;
        }
        self.open = self.open.saturating_sub(1);
    }

    /// Handle a text event.
    ///
    /// Whitespace-only text is dropped. Other text outside the root
    /// element fails the parse. Otherwise the status is captured when the
    /// current element is `code`, and the policy is invoked.
    ///
    /// A policy error is held until [`finish`](Self::finish), so a failing
    /// status still wins over it. The policy is not called again after it
    /// has failed.
    pub fn text<F>(&mut self, raw: &str, policy: &mut F) -> Result<()>
    where
        F: FnMut(&TextNode<'_>) -> Result<()>,
    {
        if self.state.is_terminal() {
            return Ok(());
        }
        let text = raw.trim();
        if text.is_empty() {
            return Ok(());
        }
        if self.open == 0 {
            self.state = ParseState::Failed;
            return Err(GeocoderError::ContentOutsideRoot(text.to_string()));
        }

        let element = self.current.as_deref().unwrap_or_default();
        tracing::debug!(element, text, "Character data");

        if element == STATUS_ELEMENT {
            self.status = Some(text.to_string());
        }

        if self.policy_error.is_none() {
            let node = TextNode {
                element,
                text,
                ancestors: &self.stack,
            };
            if let Err(e) = policy(&node) {
                tracing::debug!(error = %e, "Extraction failed");
                self.policy_error = Some(e);
            }
        }
        Ok(())
    }

    /// Mark the parse as failed. Subsequent events are ignored.
    pub fn abort(&mut self) {
        self.state = ParseState::Failed;
    }

    /// Finish the parse after the document has ended.
    ///
    /// Checks, in order: a root element was seen and closed, the captured
    /// status (if any) is the success code, and the policy did not fail.
    pub fn finish(&mut self) -> Result<()> {
        match self.state {
            ParseState::Completed => return Ok(()),
            ParseState::Failed => return Err(GeocoderError::ParseAborted),
            ParseState::NotStarted => {
                self.state = ParseState::Failed;
                return Err(GeocoderError::NoRootElement);
            }
            ParseState::InProgress => {}
        }

        if self.open > 0 {
            self.state = ParseState::Failed;
            let element = self.current.clone().unwrap_or_default();
            return Err(GeocoderError::UnclosedElement(element));
        }

        if let Some(status) = self.status.as_deref() {
            if status != SUCCESS_STATUS {
                self.state = ParseState::Failed;
                tracing::warn!(status, "Geocoder service reported failure");
                return Err(GeocoderError::ServiceStatus(status.to_string()));
            }
        }

        if let Some(e) = self.policy_error.take() {
            self.state = ParseState::Failed;
            return Err(e);
        }

        self.state = ParseState::Completed;
        Ok(())
    }
}

/// Parse an XML response stream, feeding text nodes to `policy`.
///
/// The stream is consumed and dropped before this returns, on success and
/// on failure alike. The policy's side effects are the only output; after
/// an error they must be treated as invalid.
///
/// # Errors
/// * Reading, decoding or XML syntax failures fail with a transport/parse
///   error, as do documents without a root element, documents ending with
///   an unclosed element, and elements or text after the root.
/// * A captured status other than `"200"` fails with
///   [`GeocoderError::ServiceStatus`], even when the policy also failed.
/// * Otherwise the first error returned by `policy` is propagated
///   unchanged.
///
/// # Examples
/// ```
/// use geocoder::xml::parse;
///
/// let xml = "<kml><Response><Status><code>200</code></Status><Point><coordinates>37.4,-122.1</coordinates></Point></Response></kml>";
/// let mut seen = Vec::new();
/// parse(xml.as_bytes(), |node| {
///     seen.push(node.element.to_string());
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(seen, vec!["code", "coordinates"]);
/// ```
pub fn parse<R, F>(stream: R, mut policy: F) -> Result<()>
where
    R: Read,
    F: FnMut(&TextNode<'_>) -> Result<()>,
{
    let mut reader = Reader::from_reader(BufReader::new(stream));
    let mut parser = ResponseParser::new();
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                parser.abort();
                tracing::debug!(error = %e, position = reader.buffer_position(), "XML read failed");
                return Err(e.into());
            }
        };

        let step = match event {
            Event::Start(e) => element_name(&e).and_then(|name| parser.start_element(name)),
            Event::Empty(e) => element_name(&e).and_then(|name| {
                parser.start_element(name)?;
                parser.end_element();
                Ok(())
            }),
            Event::End(_) => {
                parser.end_element();
                Ok(())
            }
            Event::Text(e) => e
                .unescape()
                .map_err(GeocoderError::from)
                .and_then(|text| parser.text(&text, &mut policy)),
            Event::CData(e) => cdata_text(e.into_inner())
                .and_then(|text| parser.text(&text, &mut policy)),
            Event::Eof => break,
            _ => Ok(()),
        };

        if let Err(e) = step {
            parser.abort();
            return Err(e);
        }
        buf.clear();
    }

    parser.finish()
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_owned)
        .map_err(|e| GeocoderError::XmlEncoding(format!("element name: {e}")))
}

fn cdata_text(bytes: Cow<'_, [u8]>) -> Result<String> {
    String::from_utf8(bytes.into_owned())
        .map_err(|e| GeocoderError::XmlEncoding(format!("CDATA section: {e}")))
}
