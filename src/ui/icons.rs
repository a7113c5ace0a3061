pub struct Icons;

impl Icons {
    pub const BOOKS: &str = "📚";
    pub const BOOK: &str = "📖";
    pub const CHECK: &str = "✅";
    pub const WARN: &str = "⚠️";
    pub const STATS: &str = "📊";
    pub const BRAIN: &str = "🧠";
    pub const NEW: &str = "✨";
    pub const DEL: &str = "🗑️";
    pub const DATABASE: &str = "🗄️";
    pub const PERSON: &str = "👤";
    pub const PAGE: &str = "📄";
    pub const BOOKMARK: &str = "🔖";
    pub const CLOCK: &str = "⏱️";
}
