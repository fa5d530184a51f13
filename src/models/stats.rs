use serde::{Deserialize, Serialize};

/// Aggregates the backend computes over the whole collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CollectionStats {
    #[serde(rename = "total_juegos")]
    pub total: u64,
    #[serde(rename = "juegos_completados")]
    pub completed: u64,
    #[serde(rename = "juegos_jugando")]
    pub playing: u64,
    #[serde(rename = "juegos_sin_iniciar")]
    pub not_started: u64,
    #[serde(rename = "juegos_abandonados")]
    pub abandoned: u64,
    #[serde(rename = "total_horas_jugadas")]
    pub total_hours: u64,
    #[serde(rename = "calificacion_promedio")]
    pub average_rating: f64,
}

/// `round(part / total * 100)`, 0 for an empty total.
pub fn percentage(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }

    return ((part as f64 / total as f64) * 100.0).round() as u64;
}

pub fn format_hours(hours: u64) -> String {
    if hours == 0 {
        return "0h".to_string();
    }
    if hours < 24 {
        return format!("{hours}h");
    }

    let days = hours / 24;
    let remaining = hours % 24;
    if remaining == 0 {
        return format!("{days}d");
    }

    return format!("{days}d {remaining}h");
}

impl CollectionStats {
    pub fn completed_pct(&self) -> u64 {
        return percentage(self.completed, self.total);
    }

    pub fn playing_pct(&self) -> u64 {
        return percentage(self.playing, self.total);
    }

    pub fn not_started_pct(&self) -> u64 {
        return percentage(self.not_started, self.total);
    }

    /// Share of the collection that has been started at all.
    pub fn active_pct(&self) -> u64 {
        return percentage(self.playing + self.completed, self.total);
    }

    pub fn total_hours_label(&self) -> String {
        return format_hours(self.total_hours);
    }

    pub fn average_hours_per_game(&self) -> Option<u64> {
        if self.total == 0 {
            return None;
        }

        return Some((self.total_hours as f64 / self.total as f64).round() as u64);
    }

    pub fn average_rating_label(&self) -> String {
        return format!("{:.1}", self.average_rating);
    }

    pub fn rating_tone(&self) -> &'static str {
        if self.average_rating >= 8.0 {
            return "success";
        }
        if self.average_rating >= 6.0 {
            return "warning";
        }

        return "danger";
    }

    pub fn rating_verdict(&self) -> &'static str {
        if self.average_rating >= 8.0 {
            return "¡Excelente colección!";
        }
        if self.average_rating >= 6.0 {
            return "Buena colección";
        }

        return "Colección en desarrollo";
    }

    /// `None` when nothing was abandoned.
    pub fn abandoned_label(&self) -> Option<String> {
        return match self.abandoned {
            0 => None,
            1 => Some("1 Juego Abandonado".to_string()),
            n => Some(format!("{n} Juegos Abandonados")),
        };
    }
}
