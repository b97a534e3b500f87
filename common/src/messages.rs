//! 画面表示文言
//!
//! バックエンド（Flask）の表示言語に合わせたインドネシア語の固定文言。
//! 応答テキストの番兵文字列はサーバー側の文言と完全一致で比較する。

/// ログが空のときのプレースホルダ
pub const EMPTY_LOG: &str = "Belum ada log kinerja.";

/// 値が無いセル
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================
// ステータス
// ============================================

pub const STATUS_INITIALIZING: &str = "Menginisialisasi...";
pub const STATUS_UPLOADING: &str = "Mengunggah file ePub dan memproses...";
pub const STATUS_CLEARING: &str = "Membersihkan log kinerja...";

/// 失敗応答に error が無いときの代替文言（アップロード）
pub const UPLOAD_ERROR_FALLBACK: &str = "Terjadi kesalahan yang tidak diketahui.";
/// 失敗応答に error が無いときの代替文言（ログ削除）
pub const CLEAR_ERROR_FALLBACK: &str = "Gagal membersihkan log.";

pub const UPLOAD_NETWORK_ERROR: &str =
    "Terjadi kesalahan saat berkomunikasi dengan server. Cek konsol browser.";
pub const CLEAR_NETWORK_ERROR: &str = "Terjadi kesalahan saat membersihkan log.";

pub const CLEAR_CONFIRMATION: &str =
    "Apakah Anda yakin ingin menghapus semua log kinerja? Aksi ini tidak dapat dibatalkan.";

// ============================================
// 結果パネル
// ============================================

pub const TEXT_HEADING: &str = "Hasil Pemrosesan AI (Teks)";
pub const TEXT_PLACEHOLDER: &str = "Tidak ada hasil AI (teks) yang diminta atau dihasilkan.";

pub const IMAGE_HEADING: &str = "Hasil Pemrosesan AI (Gambar)";
pub const IMAGE_PLACEHOLDER: &str = "Tidak ada hasil AI (gambar) yang diminta atau dihasilkan.";
pub const IMAGE_ALT: &str = "Hasil AI Gemini";

pub const GALLERY_HEADING: &str = "Konten ePub Asli (Gambar)";
pub const GALLERY_PLACEHOLDER: &str = "Tidak ada gambar konten ePub yang dihasilkan.";
pub const GALLERY_FAILED: &str = "Gagal mengkonversi file. Silakan coba lagi.";
pub const GALLERY_IMAGE_ALT: &str = "Konversi Gambar ePub";

/// サーバーが「応答なし」を表すときに返すテキスト
pub const NO_RESPONSE_SENTINELS: &[&str] = &[
    "Tidak ada respons dari AI.",
    "Tidak ada respons yang dihasilkan dari model.",
];

/// 失敗時のステータス文言
pub fn error_status(error: Option<&str>, fallback: &str) -> String {
    // 空文字はサーバーが何も返さなかったのと同じ扱い
    let detail = error.filter(|e| !e.is_empty()).unwrap_or(fallback);
    format!("Error: {}", detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_with_detail() {
        assert_eq!(error_status(Some("bad file"), UPLOAD_ERROR_FALLBACK), "Error: bad file");
    }

    #[test]
    fn test_error_status_fallback() {
        assert_eq!(
            error_status(None, CLEAR_ERROR_FALLBACK),
            "Error: Gagal membersihkan log."
        );
        assert_eq!(
            error_status(Some(""), UPLOAD_ERROR_FALLBACK),
            "Error: Terjadi kesalahan yang tidak diketahui."
        );
    }

    #[test]
    fn test_sentinels_are_distinct() {
        assert_eq!(NO_RESPONSE_SENTINELS.len(), 2);
        assert_ne!(NO_RESPONSE_SENTINELS[0], NO_RESPONSE_SENTINELS[1]);
    }
}
