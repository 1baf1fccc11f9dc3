use common::model::placeholder::PlaceholderDescriptor;

pub enum Msg {
    /// The file picker changed. `None` when the dialog was cancelled.
    FileChanged(Option<web_sys::File>),
    SubmitDiscovery,
    /// Discovery answered for `file`, which may no longer be the selected one.
    KeysLoaded {
        file: web_sys::File,
        keys: Vec<PlaceholderDescriptor>,
    },
    ValueChanged { code: String, value: String },
    SubmitGeneration,
    DownloadFinished,
    /// A request failed. Only reported to the console.
    RequestFailed(String),
}
