use crate::core::{FeatureVector, Regressor, Result};
use crate::domain::model::FEATURE_COUNT;
use crate::utils::error::AppError;
use crate::utils::validation::{validate_finite, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest: average of tree outputs.
    #[default]
    Mean,
    /// Boosted trees: learning rate is already folded into the leaves.
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Flat node array, root at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<Node>,
}

impl RegressionTree {
    /// Walks from the root; a sample goes left when `x[feature] <= threshold`.
    ///
    /// Every step must move to a higher index, so the walk terminates. A tree
    /// that breaks this or points outside `nodes`/`x` evaluates to `NaN`
    /// instead of panicking; `validate` rejects such trees up front.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let Some(sample) = x.get(*feature) else {
                        return f64::NAN;
                    };
                    let next = if *sample <= *threshold { *left } else { *right };
                    if next <= index {
                        return f64::NAN;
                    }
                    index = next;
                }
                None => return f64::NAN,
            }
        }
    }

    fn validate_structure(&self, tree_index: usize) -> Result<()> {
        let invalid = |message: String| AppError::InvalidModelError {
            message: format!("trees[{}]: {}", tree_index, message),
        };

        if self.nodes.is_empty() {
            return Err(invalid("tree has no nodes".to_string()));
        }

        for (position, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(format!("nodes[{}] leaf value is not finite", position)));
                    }
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(invalid(format!(
                            "nodes[{}] splits on feature {} (only {} features)",
                            position, feature, FEATURE_COUNT
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("nodes[{}] threshold is not finite", position)));
                    }
                    for child in [*left, *right] {
                        if child <= position || child >= self.nodes.len() {
                            return Err(invalid(format!(
                                "nodes[{}] has child index {} outside {}..{}",
                                position,
                                child,
                                position + 1,
                                self.nodes.len()
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    pub trees: Vec<RegressionTree>,
}

impl Regressor for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_slice();
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(x)).sum();

        match self.aggregation {
            Aggregation::Mean => self.base_score + total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + total,
        }
    }

    fn describe(&self) -> String {
        let nodes: usize = self.trees.iter().map(|t| t.nodes.len()).sum();
        format!(
            "tree ensemble ({} trees, {} nodes, {:?} aggregation)",
            self.trees.len(),
            nodes,
            self.aggregation
        )
    }
}

impl Validate for TreeEnsemble {
    fn validate(&self) -> Result<()> {
        validate_finite("base_score", &[self.base_score])?;

        if self.trees.is_empty() {
            return Err(AppError::InvalidModelError {
                message: "tree ensemble has no trees".to_string(),
            });
        }

        for (tree_index, tree) in self.trees.iter().enumerate() {
            tree.validate_structure(tree_index)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// LSTAT <= 10 ? 30 : (NOX <= 0.6 ? 20 : 12)
    fn stump() -> RegressionTree {
        RegressionTree {
            nodes: vec![
                Node::Split {
                    feature: 9,
                    threshold: 10.0,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: 30.0 },
                Node::Split {
                    feature: 4,
                    threshold: 0.6,
                    left: 3,
                    right: 4,
                },
                Node::Leaf { value: 20.0 },
                Node::Leaf { value: 12.0 },
            ],
        }
    }

    fn with_lstat_nox(lstat: f64, nox: f64) -> FeatureVector {
        FeatureVector::new([0.1, 0.0, 7.0, 0.0, nox, 65.0, 4.0, 18.0, 390.0, lstat])
    }

    #[test]
    fn test_tree_walk() {
        let tree = stump();
        assert_eq!(tree.evaluate(with_lstat_nox(5.0, 0.5).as_slice()), 30.0);
        assert_eq!(tree.evaluate(with_lstat_nox(10.0, 0.5).as_slice()), 30.0);
        assert_eq!(tree.evaluate(with_lstat_nox(15.0, 0.5).as_slice()), 20.0);
        assert_eq!(tree.evaluate(with_lstat_nox(15.0, 0.7).as_slice()), 12.0);
    }

    #[test]
    fn test_mean_and_sum_aggregation() {
        let constant = RegressionTree {
            nodes: vec![Node::Leaf { value: 10.0 }],
        };
        let mut ensemble = TreeEnsemble {
            base_score: 1.0,
            aggregation: Aggregation::Mean,
            trees: vec![stump(), constant],
        };
        let x = with_lstat_nox(5.0, 0.5);

        assert_eq!(ensemble.predict(&x), 21.0);

        ensemble.aggregation = Aggregation::Sum;
        assert_eq!(ensemble.predict(&x), 41.0);
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let ensemble = TreeEnsemble {
            base_score: 0.0,
            aggregation: Aggregation::Mean,
            trees: vec![RegressionTree {
                nodes: vec![
                    Node::Split {
                        feature: 0,
                        threshold: 1.0,
                        left: 0,
                        right: 1,
                    },
                    Node::Leaf { value: 1.0 },
                ],
            }],
        };
        let err = ensemble.validate().unwrap_err();
        assert!(err.to_string().contains("trees[0]"));
    }

    #[test]
    fn test_validate_rejects_unknown_feature() {
        let ensemble = TreeEnsemble {
            base_score: 0.0,
            aggregation: Aggregation::Sum,
            trees: vec![RegressionTree {
                nodes: vec![
                    Node::Split {
                        feature: FEATURE_COUNT,
                        threshold: 1.0,
                        left: 1,
                        right: 2,
                    },
                    Node::Leaf { value: 1.0 },
                    Node::Leaf { value: 2.0 },
                ],
            }],
        };
        assert!(ensemble.validate().is_err());
    }

    #[test]
    fn test_malformed_tree_evaluates_to_nan() {
        let x = with_lstat_nox(5.0, 0.5);

        let empty = RegressionTree { nodes: vec![] };
        assert!(empty.evaluate(x.as_slice()).is_nan());

        let dangling = RegressionTree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 1.0,
                left: 7,
                right: 8,
            }],
        };
        assert!(dangling.evaluate(x.as_slice()).is_nan());

        let unknown_feature = RegressionTree {
            nodes: vec![
                Node::Split {
                    feature: 42,
                    threshold: 1.0,
                    left: 1,
                    right: 1,
                },
                Node::Leaf { value: 1.0 },
            ],
        };
        assert!(unknown_feature.evaluate(x.as_slice()).is_nan());

        let cycle = RegressionTree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 0,
            }],
        };
        assert!(cycle.evaluate(x.as_slice()).is_nan());
    }

    #[test]
    fn test_validate_rejects_empty_ensemble() {
        let ensemble = TreeEnsemble {
            base_score: 0.0,
            aggregation: Aggregation::Mean,
            trees: vec![],
        };
        assert!(ensemble.validate().is_err());
        assert!(stump().validate_structure(0).is_ok());
    }
}
