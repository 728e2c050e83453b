//! Human-readable validation reports

use super::ValidationOutcome;

const RULE_WIDTH: usize = 60;

pub struct ValidationReport;

impl ValidationReport {
    /// Multi-line report: score banner, one line per check, recommendations
    #[must_use]
    pub fn format(outcome: &ValidationOutcome) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut output = String::new();

        output.push_str(&format!("{rule}\n"));
        output.push_str("📊 REPORTE DE VALIDACIÓN DE RESPUESTA\n");
        output.push_str(&format!("{rule}\n\n"));

        let (status_emoji, status) = if outcome.is_valid {
            ("✅", "VÁLIDA")
        } else {
            ("⚠️", "REQUIERE ATENCIÓN")
        };
        output.push_str(&format!(
            "{status_emoji} Score de Calidad: {:.1}%\n",
            outcome.score * 100.0
        ));
        output.push_str(&format!("   Estado: {status}\n"));

        output.push_str("\n📋 Detalle de Validaciones:\n");
        for (check, passed) in &outcome.checks {
            let mark = if *passed { "✅ PASS" } else { "❌ FAIL" };
            output.push_str(&format!("   {mark} {}\n", check.humanized()));
        }

        output.push_str("\n💡 Recomendaciones:\n");
        for recommendation in &outcome.recommendations {
            output.push_str(&format!("   • {recommendation}\n"));
        }

        output.push_str(&rule);
        output.push('\n');
        output
    }

    /// One-line summary, e.g. `90.0% (8/10 checks, VÁLIDA)`
    #[must_use]
    pub fn summary(outcome: &ValidationOutcome) -> String {
        format!(
            "{:.1}% ({}/{} checks, {})",
            outcome.score * 100.0,
            outcome.passed_count(),
            outcome.checks.len(),
            if outcome.is_valid {
                "VÁLIDA"
            } else {
                "REQUIERE ATENCIÓN"
            }
        )
    }
}
