//! Text patch that wires a new feature into the service locator.
//!
//! The patch is idempotent: an import or setup call that is already present
//! is never inserted a second time.

use std::sync::LazyLock;

use regex::Regex;

/// Comment under which feature registrations are appended.
pub const FEATURE_DI_MARKER: &str = "//Feature DI setup";

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"import [^;]+;").expect("valid import regex"));

// Last core `await X.setup(_serviceLocator);` directly followed by the
// closing brace of the setup method.
static SETUP_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\s+await\s+\w+\.setup\(_serviceLocator\);\s*\n)(\s*\})")
        .expect("valid setup regex")
});

/// Where the setup call ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallAnchor {
    /// Inserted below [`FEATURE_DI_MARKER`].
    Marker,
    /// Marker was missing; inserted (with a new marker) at the end of the
    /// setup method.
    SetupTail,
    /// The exact call was already there.
    AlreadyPresent,
    /// No place to put it; content left unchanged.
    NotFound,
}

/// Outcome of [`BootstrapPatch::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    pub content: String,
    pub import_added: bool,
    pub call_anchor: CallAnchor,
}

impl PatchResult {
    pub fn changed(&self) -> bool {
        self.import_added || matches!(self.call_anchor, CallAnchor::Marker | CallAnchor::SetupTail)
    }
}

/// An import line plus a registration call to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPatch {
    import: String,
    setup_call: String,
}

impl BootstrapPatch {
    pub fn new(import: impl Into<String>, setup_call: impl Into<String>) -> Self {
        Self {
            import: import.into(),
            setup_call: setup_call.into(),
        }
    }

    pub fn setup_call(&self) -> &str {
        &self.setup_call
    }

    /// Inserted lines use the file's own line ending (`\r\n` or `\n`).
    pub fn apply(&self, content: &str) -> PatchResult {
        let nl = line_ending(content);
        let (content, import_added) = self.insert_import(content, nl);
        let (content, call_anchor) = self.insert_call(content, nl);
        PatchResult {
            content,
            import_added,
            call_anchor,
        }
    }

    fn insert_import(&self, content: &str, nl: &str) -> (String, bool) {
        if content.contains(&self.import) {
            return (content.to_string(), false);
        }

        let mut out = content.to_string();
        match IMPORT_RE.find_iter(content).last() {
            Some(last) => out.insert_str(last.end(), &format!("{nl}{}", self.import)),
            None => out.insert_str(0, &format!("{}{nl}", self.import)),
        }
        (out, true)
    }

    fn insert_call(&self, content: String, nl: &str) -> (String, CallAnchor) {
        if content.contains(self.setup_call.trim()) {
            return (content, CallAnchor::AlreadyPresent);
        }

        if let Some(pos) = content.find(FEATURE_DI_MARKER) {
            let mut out = content;
            let line_end = out[pos..].find('\n').map(|i| pos + i + 1);
            match line_end {
                Some(at) => out.insert_str(at, &format!("{}{nl}", self.setup_call)),
                None => out.push_str(&format!("{nl}{}{nl}", self.setup_call)),
            }
            return (out, CallAnchor::Marker);
        }

        let Some(caps) = SETUP_TAIL_RE.captures(&content) else {
            return (content, CallAnchor::NotFound);
        };
        let (Some(whole), Some(body), Some(close)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            return (content, CallAnchor::NotFound);
        };

        let replacement = format!(
            "{}{nl}    {FEATURE_DI_MARKER}{nl}{}{nl}{}",
            body.as_str(),
            self.setup_call,
            close.as_str()
        );
        let mut out = String::with_capacity(content.len() + replacement.len());
        out.push_str(&content[..whole.start()]);
        out.push_str(&replacement);
        out.push_str(&content[whole.end()..]);
        (out, CallAnchor::SetupTail)
    }
}

fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") { "\r\n" } else { "\n" }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPORT: &str = "import 'package:shop/features/cart/di/cart_di.dart';";
    const CALL: &str = "    await CartDi.setup(_serviceLocator);";

    fn patch() -> BootstrapPatch {
        BootstrapPatch::new(IMPORT, CALL)
    }

    const WITH_MARKER: &str = "import 'package:get_it/get_it.dart';
import 'package:shop/core/network.dart';

final _serviceLocator = GetIt.instance;

class ServiceLocator {
  static Future<void> setUp() async {
    await NetworkDi.setup(_serviceLocator);

    //Feature DI setup
    await HomeDi.setup(_serviceLocator);
  }
}
";

    const WITHOUT_MARKER: &str = "import 'package:get_it/get_it.dart';

final _serviceLocator = GetIt.instance;

class ServiceLocator {
  static Future<void> setUp() async {
    await NetworkDi.setup(_serviceLocator);
  }
}
";

    #[test]
    fn import_goes_after_last_import() {
        let out = patch().apply(WITH_MARKER);
        assert!(out.import_added);
        assert!(out.content.contains(&format!(
            "import 'package:shop/core/network.dart';\n{IMPORT}"
        )));
    }

    #[test]
    fn call_goes_below_marker() {
        let out = patch().apply(WITH_MARKER);
        assert_eq!(out.call_anchor, CallAnchor::Marker);
        assert!(out.content.contains(&format!("//Feature DI setup\n{CALL}\n")));
        assert!(out.changed());
    }

    #[test]
    fn missing_marker_falls_back_to_setup_tail() {
        let out = patch().apply(WITHOUT_MARKER);
        assert_eq!(out.call_anchor, CallAnchor::SetupTail);
        assert!(out.content.contains(&format!(
            "await NetworkDi.setup(_serviceLocator);\n\n    //Feature DI setup\n{CALL}\n  }}"
        )));
    }

    #[test]
    fn applying_twice_is_idempotent() {
        for source in [WITH_MARKER, WITHOUT_MARKER] {
            let once = patch().apply(source);
            let twice = patch().apply(&once.content);
            assert_eq!(once.content, twice.content);
            assert!(!twice.import_added);
            assert_eq!(twice.call_anchor, CallAnchor::AlreadyPresent);
            assert!(!twice.changed());
        }
    }

    #[test]
    fn crlf_files_stay_crlf() {
        for source in [WITH_MARKER, WITHOUT_MARKER] {
            let crlf = source.replace('\n', "\r\n");
            let out = patch().apply(&crlf);

            assert!(out.changed());
            assert!(out.content.contains(&format!("{IMPORT}\r\n")));
            assert!(out.content.contains(&format!("{CALL}\r\n")));
            assert_eq!(
                out.content.matches('\n').count(),
                out.content.matches("\r\n").count(),
                "bare LF in {:?}",
                out.content
            );
            assert_eq!(patch().apply(&out.content).content, out.content);
        }
    }

    #[test]
    fn unrecognised_file_only_gets_import() {
        let out = patch().apply("void main() {}\n");
        assert!(out.content.starts_with(IMPORT));
        assert_eq!(out.call_anchor, CallAnchor::NotFound);
    }
}
