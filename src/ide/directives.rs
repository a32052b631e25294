//! Known Blade directives.
//!
//! The built-in table covers Laravel's Blade compiler and Livewire. Projects
//! register their own directives (`Blade::directive(...)`) through
//! [`DirectiveRegistry::with_custom`].

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::ide::text_utils::is_word_character;

/// Block openers and the directive that closes them.
const BLOCK_PAIRS: &[(&str, &str)] = &[
    ("if", "endif"),
    ("unless", "endunless"),
    ("isset", "endisset"),
    ("empty", "endempty"),
    ("auth", "endauth"),
    ("guest", "endguest"),
    ("env", "endenv"),
    ("production", "endproduction"),
    ("can", "endcan"),
    ("cannot", "endcannot"),
    ("canany", "endcanany"),
    ("for", "endfor"),
    ("foreach", "endforeach"),
    ("forelse", "endforelse"),
    ("while", "endwhile"),
    ("switch", "endswitch"),
    ("section", "endsection"),
    ("push", "endpush"),
    ("pushOnce", "endPushOnce"),
    ("pushIf", "endPushIf"),
    ("prepend", "endprepend"),
    ("prependOnce", "endPrependOnce"),
    ("once", "endonce"),
    ("component", "endcomponent"),
    ("slot", "endslot"),
    ("verbatim", "endverbatim"),
    ("php", "endphp"),
    ("error", "enderror"),
    ("fragment", "endfragment"),
    ("session", "endsession"),
    ("context", "endcontext"),
    ("hasSection", "endif"),
    ("sectionMissing", "endif"),
    ("teleport", "endteleport"),
    ("persist", "endpersist"),
    ("script", "endscript"),
    ("assets", "endassets"),
];

/// Directives that stand alone or continue a block.
const INLINE: &[&str] = &[
    "else",
    "elseif",
    "elseauth",
    "elseguest",
    "elsecan",
    "elsecannot",
    "elsecanany",
    "case",
    "default",
    "break",
    "continue",
    "show",
    "stop",
    "overwrite",
    "append",
    "parent",
    "yield",
    "extends",
    "extendsFirst",
    "include",
    "includeIf",
    "includeWhen",
    "includeUnless",
    "includeFirst",
    "each",
    "stack",
    "hasstack",
    "inject",
    "json",
    "js",
    "lang",
    "choice",
    "csrf",
    "method",
    "dd",
    "dump",
    "vite",
    "viteReactRefresh",
    "class",
    "style",
    "checked",
    "selected",
    "disabled",
    "readonly",
    "required",
    "props",
    "aware",
    "use",
    "livewire",
    "livewireStyles",
    "livewireScripts",
    "livewireScriptConfig",
    "entangle",
    "this",
];

#[derive(Debug, Clone)]
pub struct DirectiveRegistry {
    known: FxHashSet<SmolStr>,
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DirectiveRegistry {
    pub fn builtin() -> Self {
        let known = BLOCK_PAIRS
            .iter()
            .flat_map(|&(open, close)| [open, close])
            .chain(INLINE.iter().copied())
            .map(SmolStr::new)
            .collect();
        Self { known }
    }

    /// Add collaborator-supplied directive names, with or without the `@`.
    pub fn with_custom<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known
            .extend(names.into_iter().map(|n| SmolStr::new(strip_at(n.as_ref()))));
        self
    }

    /// Whether `name` (with or without `@`) is a known directive.
    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(strip_at(name))
    }

    /// Closing directive for a block opener, without the `@`.
    pub fn block_closer(&self, name: &str) -> Option<&'static str> {
        let name = strip_at(name);
        BLOCK_PAIRS
            .iter()
            .find(|&&(open, _)| open == name)
            .map(|&(_, close)| close)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

/// Name of the directive `text` starts with, without the `@`.
///
/// `"@if($a)"` gives `"if"`; text not starting with `@name` gives `None`.
pub fn directive_name(text: &str) -> Option<&str> {
    let rest = text.trim_start().strip_prefix('@')?;
    let end = rest
        .char_indices()
        .find(|&(_, c)| !is_word_character(c))
        .map_or(rest.len(), |(i, _)| i);
    (end > 0).then(|| &rest[..end])
}

fn strip_at(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}
