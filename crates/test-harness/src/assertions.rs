//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes expected vs actual and the offending content,
//! tagged with a caller-supplied context string.

use annotate_engine::types::RenderSummary;
use geom_bridge::MockGeometry;

use crate::helpers::HarnessError;

/// Assert the exact number of text blocks emitted.
pub fn assert_text_count(
    mock: &MockGeometry,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    if mock.texts.len() == expected {
        Ok(())
    } else {
        let contents: Vec<&str> = mock.texts.iter().map(|t| t.content.as_str()).collect();
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {} text blocks, got {}: {:?}",
                ctx,
                expected,
                mock.texts.len(),
                contents,
            ),
        })
    }
}

/// Assert the exact number of strokes emitted.
pub fn assert_stroke_count(
    mock: &MockGeometry,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    if mock.strokes.len() == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {} strokes, got {}",
                ctx,
                expected,
                mock.strokes.len(),
            ),
        })
    }
}

/// Assert that some emitted text block contains `needle`.
pub fn assert_text_contains(
    mock: &MockGeometry,
    needle: &str,
    ctx: &str,
) -> Result<(), HarnessError> {
    if mock.texts.iter().any(|t| t.content.contains(needle)) {
        Ok(())
    } else {
        let contents: Vec<&str> = mock.texts.iter().map(|t| t.content.as_str()).collect();
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] no text block contains '{}'; emitted: {:?}",
                ctx, needle, contents,
            ),
        })
    }
}

/// Assert the listed part numbers, in traversal order.
pub fn assert_parts_eq(
    summary: &RenderSummary,
    expected: &[&str],
    ctx: &str,
) -> Result<(), HarnessError> {
    if summary.parts == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected parts {:?}, got {:?}",
                ctx, expected, summary.parts,
            ),
        })
    }
}

/// Assert the render raised no recoverable conditions.
pub fn assert_no_warnings(summary: &RenderSummary, ctx: &str) -> Result<(), HarnessError> {
    if summary.warnings.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] unexpected warnings: {:?}", ctx, summary.warnings),
        })
    }
}
