//! Small numeric helpers shared by the analysis stages

pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Population variance
pub fn variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f32>() / values.len() as f32
}

/// Population standard deviation
pub fn std_dev(values: &[f32]) -> f32 {
    variance(values).sqrt()
}

/// Shannon entropy (natural log) of `values` treated as unnormalised weights
pub fn entropy(values: &[f32]) -> f32 {
    let total: f32 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return 0.0;
    }
    values
        .iter()
        .filter(|v| **v > 0.0)
        .map(|v| {
            let p = v / total;
            -p * p.ln()
        })
        .sum()
}

/// Index of the largest value, first one wins ties
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Element-wise mean across rows of equal length
pub fn column_mean(rows: &[Vec<f32>], width: usize) -> Vec<f32> {
    let mut out = vec![0.0; width];
    if rows.is_empty() {
        return out;
    }
    for row in rows {
        for (acc, v) in out.iter_mut().zip(row) {
            *acc += v;
        }
    }
    out.iter_mut().for_each(|v| *v /= rows.len() as f32);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), 5.0);
        assert_eq!(std_dev(&v), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_entropy_uniform() {
        let uniform = [1.0f32; 12];
        assert!((entropy(&uniform) - 12f32.ln()).abs() < 1e-5);
        assert_eq!(entropy(&[5.0, 0.0, 0.0]), 0.0);
        assert_eq!(entropy(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_column_mean() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(column_mean(&rows, 2), vec![2.0, 3.0]);
    }
}
