use std::io::Error as IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Ошибки при извлечении поступлений из выписки
///
/// Сам разбор строк выписки ошибок не возвращает: непонятная строка просто пропускается.
/// Ошибки возникают только на границах: чтение входа, конфиг, запись CSV.
#[derive(Debug, Error)]
pub enum ExtractError {
    // обёртки

    /// не удалось прочитать файл выписки (или stdin)
    #[error("failed to read statement {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    /// не удалось прочитать файл настроек
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    /// обёртка std::io::Error при записи результата
    #[error("io error: {0}")]
    Write(#[from] IoError),
    /// обёртка csv::Error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// обёртка toml::de::Error
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    /// обёртка std::num::ParseIntError
    #[error("number parse error: {0}")]
    Int(#[from] std::num::ParseIntError),

    // логические ошибки

    /// ошибка при парсинге денежной суммы
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// противоречивые или недопустимые настройки
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
